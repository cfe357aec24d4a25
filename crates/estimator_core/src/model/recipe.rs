//! Recipes: named bundles of task templates applied in one action.

use crate::model::task::Task;
use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};

pub type RecipeId = String;

/// Ordered bundle of task templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    pub tasks: Vec<Task>,
}

impl Recipe {
    pub fn new(
        id: impl Into<RecipeId>,
        name: impl Into<String>,
        description: impl Into<String>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tasks,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.tasks.iter().map(|task| task.hours).sum()
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.trim().is_empty() {
            return Err(ModelValidationError::EmptyIdentifier("recipe.id"));
        }
        self.tasks.iter().try_for_each(Task::validate)
    }
}
