//! Allocation reconciler for the burn plan grid.
//!
//! # Responsibility
//! - Keep explicit allocations consistent with roster and week changes.
//! - Derive suggested per-week hours when nothing explicit exists.
//!
//! # Invariants
//! - Suggested hours for one total always sum back to that total.
//! - An explicit record wins over the suggestion, even when it holds 0.
//! - Per-task effective hours of a person always sum to that person's
//!   effective hours for the week.
//! - Week regeneration carries allocations by position, not by date.
//! - There is never more than one record per (week, personnel, task).

use crate::calendar::generate_weeks;
use crate::model::burn_plan::BurnPlan;
use crate::model::personnel::{Personnel, PersonnelId};
use crate::model::task::TaskId;
use crate::model::validation::{ensure_amount, ModelValidationError};
use log::debug;

/// Allocated-vs-estimated difference treated as balanced.
pub const ALLOCATION_TOLERANCE_HOURS: f64 = 0.01;

/// Splits `total_hours` across `week_count` weeks.
///
/// Each week gets `floor(total / weeks)`; the first `total mod weeks` weeks
/// get one extra hour. A fractional leftover lands on the week after the
/// last +1 week, so the split always sums to `total_hours`.
pub fn suggested_hours(total_hours: f64, week_count: usize) -> Vec<f64> {
    if week_count == 0 {
        return Vec::new();
    }
    if !total_hours.is_finite() || total_hours <= 0.0 {
        return vec![0.0; week_count];
    }

    let weeks = week_count as f64;
    let base = (total_hours / weeks).floor();
    let remainder = (total_hours - base * weeks).max(0.0);
    let whole = (remainder.floor() as usize).min(week_count);
    let fraction = remainder - whole as f64;

    let mut hours = vec![base; week_count];
    for slot in hours.iter_mut().take(whole) {
        *slot += 1.0;
    }
    if fraction > 0.0 {
        let index = whole.min(week_count - 1);
        hours[index] += fraction;
    }
    hours
}

/// Suggested hours for one week index; 0 when the index is out of range.
pub fn suggested_hours_at(total_hours: f64, week_count: usize, week_index: usize) -> f64 {
    suggested_hours(total_hours, week_count)
        .get(week_index)
        .copied()
        .unwrap_or(0.0)
}

/// Outcome of regenerating the week sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regeneration {
    /// Number of weeks after regeneration.
    pub week_count: usize,
    /// Week positions whose allocations were carried over.
    pub carried_weeks: usize,
    /// Allocation records discarded with trailing weeks.
    pub dropped_allocations: usize,
}

/// Sets new plan bounds, regenerates weeks and carries allocations over by
/// positional index.
///
/// Old week `i` hands its allocations to new week `i` for every index both
/// sequences share; new trailing weeks start empty and old trailing weeks
/// are discarded.
pub fn regenerate_weeks(plan: &mut BurnPlan, start_date: &str, end_date: &str) -> Regeneration {
    plan.start_date = start_date.to_string();
    plan.end_date = end_date.to_string();

    let mut fresh = generate_weeks(start_date, end_date);
    let previous = std::mem::take(&mut plan.weeks);
    let carried_weeks = previous.len().min(fresh.len());
    let dropped_allocations = previous
        .iter()
        .skip(carried_weeks)
        .map(|week| week.allocations.len())
        .sum();

    for (week, old) in fresh.iter_mut().zip(previous) {
        week.allocations = old.allocations;
    }
    plan.weeks = fresh;

    let outcome = Regeneration {
        week_count: plan.weeks.len(),
        carried_weeks,
        dropped_allocations,
    };
    debug!(
        "event=burn_plan_regenerate module=reconcile status=ok weeks={} carried={} dropped_allocations={}",
        outcome.week_count, outcome.carried_weeks, outcome.dropped_allocations
    );
    outcome
}

/// Writes explicit hours for one (week, personnel, task) key.
///
/// Returns `Ok(false)` when `week_index` has no week.
pub fn set_allocation(
    plan: &mut BurnPlan,
    week_index: usize,
    personnel_id: PersonnelId,
    task_id: &TaskId,
    hours: f64,
) -> Result<bool, ModelValidationError> {
    ensure_amount("allocation.hours", hours)?;
    match plan.weeks.get_mut(week_index) {
        Some(week) => {
            week.upsert_allocation(personnel_id, task_id, hours);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Fans a per-week total for one person out over that person's tasks.
///
/// Each task receives `round(total * task.hours / person_total)`, rounded
/// independently, so the written sum may differ from `total_hours` by a
/// rounding remainder. A person without hours gets 0 on every task.
/// Returns how many task allocations were written.
pub fn fan_out_weekly_total(
    plan: &mut BurnPlan,
    person: &Personnel,
    week_index: usize,
    total_hours: f64,
) -> Result<usize, ModelValidationError> {
    ensure_amount("allocation.hours", total_hours)?;
    let Some(week) = plan.weeks.get_mut(week_index) else {
        return Ok(0);
    };

    let person_total = person.total_hours();
    for task in &person.tasks {
        let share = if person_total > 0.0 {
            (total_hours * task.hours / person_total).round()
        } else {
            0.0
        };
        week.upsert_allocation(person.id, &task.id, share);
    }
    Ok(person.tasks.len())
}

/// Removes every allocation of one person; returns the removed count.
pub fn purge_personnel(plan: &mut BurnPlan, personnel_id: PersonnelId) -> usize {
    plan.weeks
        .iter_mut()
        .map(|week| week.remove_allocations_where(|item| item.personnel_id == personnel_id))
        .sum()
}

/// Removes every allocation of one task id across all personnel.
pub fn purge_task(plan: &mut BurnPlan, task_id: &TaskId) -> usize {
    plan.weeks
        .iter_mut()
        .map(|week| week.remove_allocations_where(|item| &item.task_id == task_id))
        .sum()
}

/// Removes the allocations of one person/task pair.
pub fn purge_personnel_task(
    plan: &mut BurnPlan,
    personnel_id: PersonnelId,
    task_id: &TaskId,
) -> usize {
    plan.weeks
        .iter_mut()
        .map(|week| {
            week.remove_allocations_where(|item| {
                item.personnel_id == personnel_id && &item.task_id == task_id
            })
        })
        .sum()
}

/// Shares `total` across `weights` in proportion, in whole hours.
///
/// Each share starts at the floor of its exact proportion; leftover whole
/// hours go to the largest fractional parts (earlier index on ties) and any
/// fractional residue lands on the first of those. Shares sum to `total`.
/// Zero total weight yields zeros.
pub fn proportional_split(total: f64, weights: &[f64]) -> Vec<f64> {
    let weight_sum: f64 = weights.iter().sum();
    if weights.is_empty() || !total.is_finite() || total <= 0.0 || weight_sum <= 0.0 {
        return vec![0.0; weights.len()];
    }

    let exact: Vec<f64> = weights
        .iter()
        .map(|weight| total * weight / weight_sum)
        .collect();
    let mut shares: Vec<f64> = exact.iter().map(|share| share.floor()).collect();
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        let fraction_a = exact[a] - shares[a];
        let fraction_b = exact[b] - shares[b];
        fraction_b.total_cmp(&fraction_a).then(a.cmp(&b))
    });

    let mut leftover = total - shares.iter().sum::<f64>();
    for &index in &order {
        if leftover < 1.0 {
            break;
        }
        shares[index] += 1.0;
        leftover -= 1.0;
    }
    if leftover > 0.0 {
        shares[order[0]] += leftover;
    }
    shares
}

/// Suggested per-task shares of the person's suggestion for one week.
fn suggested_task_shares(plan: &BurnPlan, person: &Personnel, week_index: usize) -> Vec<f64> {
    let person_suggestion =
        suggested_hours_at(person.total_hours(), plan.week_count(), week_index);
    let weights: Vec<f64> = person.tasks.iter().map(|task| task.hours).collect();
    proportional_split(person_suggestion, &weights)
}

/// Effective hours for one task of one person in one week.
///
/// Explicit record first, otherwise the task's proportional share of the
/// person's suggestion for that week.
pub fn task_week_hours(
    plan: &BurnPlan,
    person: &Personnel,
    task_id: &TaskId,
    week_index: usize,
) -> f64 {
    let Some(week) = plan.week(week_index) else {
        return 0.0;
    };
    if let Some(allocation) = week.allocation(person.id, task_id) {
        return allocation.hours;
    }
    let Some(position) = person.tasks.iter().position(|task| &task.id == task_id) else {
        return 0.0;
    };
    suggested_task_shares(plan, person, week_index)
        .get(position)
        .copied()
        .unwrap_or(0.0)
}

/// Effective hours for one person in one week: the sum of the per-task
/// effective hours.
///
/// Without explicit records this equals the person-level suggestion, so
/// writing back any displayed task value leaves the total unchanged.
pub fn person_week_hours(plan: &BurnPlan, person: &Personnel, week_index: usize) -> f64 {
    let Some(week) = plan.week(week_index) else {
        return 0.0;
    };
    let shares = suggested_task_shares(plan, person, week_index);
    person
        .tasks
        .iter()
        .zip(shares)
        .map(|(task, share)| {
            week.allocation(person.id, &task.id)
                .map_or(share, |allocation| allocation.hours)
        })
        .sum()
}

/// Effective hours for one person across every week.
pub fn person_allocated_hours(plan: &BurnPlan, person: &Personnel) -> f64 {
    (0..plan.week_count())
        .map(|week_index| person_week_hours(plan, person, week_index))
        .sum()
}

/// Allocated-vs-estimated state of the burn plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocationStatus {
    /// The plan has no weeks yet.
    Unconfigured,
    /// Allocated hours match estimated hours within tolerance.
    Balanced,
    /// Fewer hours allocated than estimated; carries the shortfall.
    UnderAllocated(f64),
    /// More hours allocated than estimated; carries the excess.
    OverAllocated(f64),
}

/// Totals behind `AllocationStatus`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationSummary {
    pub allocated_hours: f64,
    pub estimated_hours: f64,
    pub status: AllocationStatus,
}

/// Compares effective allocated hours against estimated task hours.
pub fn allocation_summary(plan: &BurnPlan, personnel: &[Personnel]) -> AllocationSummary {
    let estimated_hours: f64 = personnel.iter().map(Personnel::total_hours).sum();
    let allocated_hours: f64 = personnel
        .iter()
        .map(|person| person_allocated_hours(plan, person))
        .sum();

    let difference = allocated_hours - estimated_hours;
    let status = if !plan.is_configured() {
        AllocationStatus::Unconfigured
    } else if difference.abs() <= ALLOCATION_TOLERANCE_HOURS {
        AllocationStatus::Balanced
    } else if difference < 0.0 {
        AllocationStatus::UnderAllocated(-difference)
    } else {
        AllocationStatus::OverAllocated(difference)
    };

    AllocationSummary {
        allocated_hours,
        estimated_hours,
        status,
    }
}
