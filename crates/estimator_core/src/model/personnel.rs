//! Personnel records.
//!
//! # Invariants
//! - A person owns its task instances; editing them never touches catalog
//!   templates or other people's copies.
//! - At most one task instance per `TaskId` per person.

use crate::model::role::Role;
use crate::model::task::{Task, TaskId};
use crate::model::validation::{ensure_amount, ModelValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable identifier for one roster entry.
pub type PersonnelId = Uuid;

/// One billable person on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: PersonnelId,
    pub name: String,
    /// Role copied by value at assignment time.
    pub role: Role,
    /// Current hourly rate; may diverge from `role.default_rate`.
    pub bill_rate: f64,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: String,
}

impl Personnel {
    /// Creates a person billed at the role's default rate.
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        let bill_rate = role.default_rate;
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            bill_rate,
            tasks: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.tasks.iter().map(|task| task.hours).sum()
    }

    pub fn has_task(&self, task_id: &TaskId) -> bool {
        self.tasks.iter().any(|task| &task.id == task_id)
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == task_id)
    }

    /// Appends a task instance unless one with the same id is present.
    ///
    /// Returns `true` when the task was attached.
    pub fn attach_task(&mut self, task: Task) -> bool {
        if self.has_task(&task.id) {
            return false;
        }
        self.tasks.push(task);
        true
    }

    pub fn remove_task(&mut self, task_id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != task_id);
        self.tasks.len() != before
    }

    pub fn set_task_hours(&mut self, task_id: &TaskId, hours: f64) -> bool {
        match self.tasks.iter_mut().find(|task| &task.id == task_id) {
            Some(task) => {
                task.hours = hours;
                true
            }
            None => false,
        }
    }

    /// Replaces the role and overwrites the bill rate with its default.
    pub fn assign_role(&mut self, role: Role) {
        self.bill_rate = role.default_rate;
        self.role = role;
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        ensure_amount("personnel.bill_rate", self.bill_rate)?;
        self.role.validate()?;
        let mut seen = HashSet::new();
        for task in &self.tasks {
            task.validate()?;
            if !seen.insert(&task.id) {
                return Err(ModelValidationError::DuplicateTask {
                    personnel: self.id.to_string(),
                    task_id: task.id.to_string(),
                });
            }
        }
        Ok(())
    }
}
