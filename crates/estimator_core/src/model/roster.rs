//! Roster model: the personnel set and their task instances.
//!
//! # Responsibility
//! - Apply person/task mutations with skip-if-present attach semantics.
//! - Mint independent task instances when templates are copied onto people.
//!
//! # Invariants
//! - Unknown person/task ids are no-ops reported as `false`/`0`, never errors.
//! - Rates and hours written through this API are validated first.
//! - The roster never touches the burn plan; cascades live one layer up.

use crate::model::personnel::{Personnel, PersonnelId};
use crate::model::recipe::Recipe;
use crate::model::role::Role;
use crate::model::task::{Task, TaskId};
use crate::model::validation::{ensure_amount, ModelValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered set of personnel for one proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    personnel: Vec<Personnel>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_personnel(personnel: Vec<Personnel>) -> Self {
        Self { personnel }
    }

    pub fn personnel(&self) -> &[Personnel] {
        &self.personnel
    }

    pub fn len(&self) -> usize {
        self.personnel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personnel.is_empty()
    }

    pub fn get(&self, id: PersonnelId) -> Option<&Personnel> {
        self.personnel.iter().find(|person| person.id == id)
    }

    fn get_mut(&mut self, id: PersonnelId) -> Option<&mut Personnel> {
        self.personnel.iter_mut().find(|person| person.id == id)
    }

    /// Adds a person with `role`, named `<name_prefix> <n>`.
    ///
    /// The new person receives one minted copy of every task already on the
    /// roster (first occurrence per source id wins) followed by every
    /// `shared_tasks` template whose source id is not covered yet.
    pub fn add_person(
        &mut self,
        role: Role,
        shared_tasks: &[Task],
        name_prefix: &str,
    ) -> PersonnelId {
        let mut seen_sources = HashSet::new();
        let mut templates: Vec<&Task> = Vec::new();
        let existing = self.personnel.iter().flat_map(|person| person.tasks.iter());
        for task in existing.chain(shared_tasks.iter()) {
            if seen_sources.insert(task.id.source().to_string()) {
                templates.push(task);
            }
        }

        let name = format!("{name_prefix} {}", self.personnel.len() + 1);
        let mut person = Personnel::new(name, role);
        person.tasks = templates.into_iter().map(Task::minted_copy).collect();
        let id = person.id;
        self.personnel.push(person);
        id
    }

    /// Appends an already-built person record.
    pub fn push(&mut self, person: Personnel) {
        self.personnel.push(person);
    }

    pub fn remove_person(&mut self, id: PersonnelId) -> Option<Personnel> {
        let index = self.personnel.iter().position(|person| person.id == id)?;
        Some(self.personnel.remove(index))
    }

    /// Assigns `role` and overwrites the bill rate with its default.
    pub fn change_role(&mut self, id: PersonnelId, role: &Role) -> bool {
        match self.get_mut(id) {
            Some(person) => {
                person.assign_role(role.clone());
                true
            }
            None => false,
        }
    }

    pub fn set_bill_rate(
        &mut self,
        id: PersonnelId,
        bill_rate: f64,
    ) -> Result<bool, ModelValidationError> {
        ensure_amount("personnel.bill_rate", bill_rate)?;
        Ok(match self.get_mut(id) {
            Some(person) => {
                person.bill_rate = bill_rate;
                true
            }
            None => false,
        })
    }

    pub fn set_notes(&mut self, id: PersonnelId, notes: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(person) => {
                person.notes = notes.into();
                true
            }
            None => false,
        }
    }

    pub fn rename(&mut self, id: PersonnelId, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(person) => {
                person.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Copies `task` onto one person unless its id is already present.
    pub fn attach_task(
        &mut self,
        id: PersonnelId,
        task: &Task,
    ) -> Result<bool, ModelValidationError> {
        task.validate()?;
        Ok(match self.get_mut(id) {
            Some(person) => person.attach_task(task.clone()),
            None => false,
        })
    }

    /// Copies `task` onto every person that does not hold its id yet.
    ///
    /// Custom tasks get one freshly minted id shared by this attachment.
    /// Returns the id the attached instances carry.
    pub fn attach_task_to_all(&mut self, task: &Task) -> Result<TaskId, ModelValidationError> {
        task.validate()?;
        let instance = if task.custom {
            task.minted_copy()
        } else {
            task.clone()
        };
        for person in &mut self.personnel {
            person.attach_task(instance.clone());
        }
        Ok(instance.id)
    }

    /// Attaches every recipe task to every person, skipping ids already
    /// present. Returns the number of instances attached.
    pub fn apply_recipe(&mut self, recipe: &Recipe) -> Result<usize, ModelValidationError> {
        recipe.validate()?;
        let mut attached = 0;
        for task in &recipe.tasks {
            for person in &mut self.personnel {
                if person.attach_task(task.clone()) {
                    attached += 1;
                }
            }
        }
        Ok(attached)
    }

    pub fn set_task_hours(
        &mut self,
        id: PersonnelId,
        task_id: &TaskId,
        hours: f64,
    ) -> Result<bool, ModelValidationError> {
        ensure_amount("task.hours", hours)?;
        Ok(match self.get_mut(id) {
            Some(person) => person.set_task_hours(task_id, hours),
            None => false,
        })
    }

    pub fn remove_task(&mut self, id: PersonnelId, task_id: &TaskId) -> bool {
        match self.get_mut(id) {
            Some(person) => person.remove_task(task_id),
            None => false,
        }
    }

    /// Removes `task_id` from every person; returns how many held it.
    pub fn remove_task_from_all(&mut self, task_id: &TaskId) -> usize {
        let mut removed = 0;
        for person in &mut self.personnel {
            if person.remove_task(task_id) {
                removed += 1;
            }
        }
        removed
    }

    pub fn total_hours(&self) -> f64 {
        self.personnel.iter().map(Personnel::total_hours).sum()
    }
}
