//! Burn plan: the date-bounded weekly allocation grid.
//!
//! # Responsibility
//! - Hold week buckets and their explicit allocations.
//! - Provide keyed upsert/removal so no (week, personnel, task) key is ever
//!   stored twice.
//!
//! # Invariants
//! - Each week spans 1..=7 days with `end_date >= start_date`.
//! - Consecutive weeks are gapless; the sequence covers the plan bounds.
//! - Plan bounds are kept exactly as entered, even when they do not parse;
//!   an unparseable or inverted range means "no weeks yet".

use crate::model::personnel::PersonnelId;
use crate::model::task::TaskId;
use crate::model::validation::{ensure_amount, ModelValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of days covered by one week bucket.
pub const DAYS_PER_WEEK: i64 = 7;

/// Explicit hours for one person/task in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub personnel_id: PersonnelId,
    pub task_id: TaskId,
    pub hours: f64,
}

/// One week bucket of the burn plan (inclusive date range).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
}

impl WeekRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            allocations: Vec::new(),
        }
    }

    /// Inclusive number of days covered by this week.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn allocation(&self, personnel_id: PersonnelId, task_id: &TaskId) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|item| item.personnel_id == personnel_id && &item.task_id == task_id)
    }

    /// Overwrites the hours of an existing key or appends a new record.
    ///
    /// Returns `true` when a new record was appended.
    pub fn upsert_allocation(
        &mut self,
        personnel_id: PersonnelId,
        task_id: &TaskId,
        hours: f64,
    ) -> bool {
        if let Some(existing) = self
            .allocations
            .iter_mut()
            .find(|item| item.personnel_id == personnel_id && &item.task_id == task_id)
        {
            existing.hours = hours;
            return false;
        }

        self.allocations.push(Allocation {
            personnel_id,
            task_id: task_id.clone(),
            hours,
        });
        true
    }

    /// Drops allocations matching `predicate`; returns how many were removed.
    pub fn remove_allocations_where(&mut self, predicate: impl Fn(&Allocation) -> bool) -> usize {
        let before = self.allocations.len();
        self.allocations.retain(|item| !predicate(item));
        before - self.allocations.len()
    }

    /// Collapses duplicate keys, keeping the last written hours at the
    /// position of the first occurrence.
    ///
    /// Returns how many duplicate records were merged away.
    pub fn merge_duplicate_allocations(&mut self) -> usize {
        let before = self.allocations.len();
        let mut merged: Vec<Allocation> = Vec::with_capacity(before);
        for item in self.allocations.drain(..) {
            match merged
                .iter_mut()
                .find(|kept| kept.personnel_id == item.personnel_id && kept.task_id == item.task_id)
            {
                Some(kept) => kept.hours = item.hours,
                None => merged.push(item),
            }
        }
        self.allocations = merged;
        before - self.allocations.len()
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        let days = self.day_count();
        if !(1..=DAYS_PER_WEEK).contains(&days) {
            return Err(ModelValidationError::InvalidWeekRange {
                start: self.start_date.to_string(),
                end: self.end_date.to_string(),
            });
        }
        self.allocations
            .iter()
            .try_for_each(|item| ensure_amount("allocation.hours", item.hours))
    }
}

/// Project-level burn plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BurnPlan {
    /// Project start as entered (`YYYY-MM-DD`).
    pub start_date: String,
    /// Project end as entered (`YYYY-MM-DD`).
    pub end_date: String,
    pub weeks: Vec<WeekRange>,
}

impl BurnPlan {
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// An empty week sequence means the plan has no usable date range yet.
    pub fn is_configured(&self) -> bool {
        !self.weeks.is_empty()
    }

    pub fn week(&self, index: usize) -> Option<&WeekRange> {
        self.weeks.get(index)
    }

    pub fn allocation_count(&self) -> usize {
        self.weeks.iter().map(|week| week.allocations.len()).sum()
    }

    /// Checks week shapes and contiguity, plus allocation amounts.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        for week in &self.weeks {
            week.validate()?;
        }
        for pair in self.weeks.windows(2) {
            if pair[0].end_date.succ_opt() != Some(pair[1].start_date) {
                return Err(ModelValidationError::InvalidWeekRange {
                    start: pair[0].end_date.to_string(),
                    end: pair[1].start_date.to_string(),
                });
            }
        }
        Ok(())
    }
}
