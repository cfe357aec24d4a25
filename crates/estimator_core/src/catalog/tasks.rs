//! Mutable task catalog.

use super::{seed, CatalogError};
use crate::model::task::{Task, TaskId};

/// Ordered task templates; custom entries keep the list sorted by name.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: Vec<Task>,
}

impl TaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn seeded_library() -> Self {
        Self::from_tasks(seed::task_library())
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Inserts a template, rejecting ids already present.
    pub fn insert(&mut self, task: Task) -> Result<(), CatalogError> {
        if self.get(&task.id).is_some() {
            return Err(CatalogError::DuplicateId(task.id.to_string()));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Adds a user-authored task and re-sorts the catalog by name.
    pub fn add_custom(&mut self, name: &str, hours: f64) -> Result<Task, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::BlankName);
        }
        if !hours.is_finite() || hours <= 0.0 {
            return Err(CatalogError::InvalidHours(hours));
        }

        let task = Task::custom(name, hours);
        self.tasks.push(task.clone());
        self.tasks.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(task)
    }

    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| &task.id == id)?;
        Some(self.tasks.remove(index))
    }
}
