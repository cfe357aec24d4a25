//! Cost engine.
//!
//! # Responsibility
//! - Derive total cost, base cost and profit from the current roster.
//! - Provide per-person and per-role cost breakdowns.
//!
//! # Invariants
//! - Figures are recomputed from state on every call; nothing is cached.
//! - Total cost already includes the margin: `base * (1 + margin) == total`.

use crate::model::personnel::{Personnel, PersonnelId};
use serde::Serialize;

/// Flat profit margin applied multiplicatively on top of base cost.
pub const PROFIT_MARGIN: f64 = 0.30;

/// Headline cost figures for a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    /// Sum of task hours times bill rate; margin included.
    pub total_cost: f64,
    /// `total_cost / (1 + PROFIT_MARGIN)`.
    pub base_cost: f64,
    /// `total_cost - base_cost`.
    pub profit: f64,
}

/// Cost of one person: task hours times that person's bill rate.
pub fn person_cost(person: &Personnel) -> f64 {
    person
        .tasks
        .iter()
        .map(|task| task.hours * person.bill_rate)
        .sum()
}

/// Cost of one roster entry by id; 0 when the id is unknown.
pub fn personnel_cost(personnel: &[Personnel], id: PersonnelId) -> f64 {
    personnel
        .iter()
        .find(|person| person.id == id)
        .map_or(0.0, person_cost)
}

pub fn total_cost(personnel: &[Personnel]) -> f64 {
    personnel.iter().map(person_cost).sum()
}

pub fn base_cost(total_cost: f64) -> f64 {
    total_cost / (1.0 + PROFIT_MARGIN)
}

pub fn summarize(personnel: &[Personnel]) -> CostSummary {
    let total_cost = total_cost(personnel);
    let base_cost = base_cost(total_cost);
    CostSummary {
        total_cost,
        base_cost,
        profit: total_cost - base_cost,
    }
}

/// Cost aggregate for all personnel sharing one role title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleCostLine {
    pub role_title: String,
    /// Bill rate of the first person seen with this role.
    pub bill_rate: f64,
    pub hours: f64,
    pub cost: f64,
    /// Non-empty notes of every person in the group, roster order.
    pub notes: Vec<String>,
}

/// Groups personnel by role title, in order of first appearance.
pub fn role_breakdown(personnel: &[Personnel]) -> Vec<RoleCostLine> {
    let mut lines: Vec<RoleCostLine> = Vec::new();
    for person in personnel {
        let index = match lines
            .iter()
            .position(|line| line.role_title == person.role.title)
        {
            Some(index) => index,
            None => {
                lines.push(RoleCostLine {
                    role_title: person.role.title.clone(),
                    bill_rate: person.bill_rate,
                    hours: 0.0,
                    cost: 0.0,
                    notes: Vec::new(),
                });
                lines.len() - 1
            }
        };

        let line = &mut lines[index];
        line.hours += person.total_hours();
        line.cost += person_cost(person);
        if !person.notes.trim().is_empty() {
            line.notes.push(person.notes.clone());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{role_breakdown, summarize, PROFIT_MARGIN};
    use crate::model::personnel::Personnel;
    use crate::model::role::Role;
    use crate::model::task::Task;

    fn person(title: &str, rate: f64, hours: &[f64]) -> Personnel {
        let mut person = Personnel::new("Resource", Role::new(title.to_lowercase(), title, rate));
        for (index, value) in hours.iter().enumerate() {
            person.attach_task(Task::new(format!("task-{index}"), "Task", *value));
        }
        person
    }

    #[test]
    fn summary_identity_holds() {
        let roster = vec![person("Senior", 114.10, &[10.0, 2.5]), person("VP", 202.14, &[7.0])];
        let summary = summarize(&roster);

        let expected_total = 12.5 * 114.10 + 7.0 * 202.14;
        assert!((summary.total_cost - expected_total).abs() < 1e-9);
        assert!((summary.base_cost * (1.0 + PROFIT_MARGIN) - summary.total_cost).abs() < 1e-9);
        assert!((summary.profit - (summary.total_cost - summary.base_cost)).abs() < 1e-12);
    }

    #[test]
    fn empty_roster_costs_nothing() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.base_cost, 0.0);
        assert_eq!(summary.profit, 0.0);
    }

    #[test]
    fn role_breakdown_groups_by_title_in_first_seen_order() {
        let mut first = person("Senior", 100.0, &[10.0]);
        first.notes = "lead".to_string();
        let second = person("VP", 200.0, &[1.0]);
        let third = person("Senior", 120.0, &[5.0]);

        let lines = role_breakdown(&[first, second, third]);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].role_title, "Senior");
        assert_eq!(lines[0].bill_rate, 100.0);
        assert_eq!(lines[0].hours, 15.0);
        assert_eq!(lines[0].cost, 1000.0 + 600.0);
        assert_eq!(lines[0].notes, vec!["lead".to_string()]);
        assert_eq!(lines[1].role_title, "VP");
    }
}
