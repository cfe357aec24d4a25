//! Mutable recipe catalog.

use super::tasks::TaskCatalog;
use super::{seed, CatalogError};
use crate::model::recipe::Recipe;
use crate::model::task::{Task, TaskId};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        Self {
            recipes: seed::recipes(),
        }
    }

    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Builds a recipe from library task ids, in library order.
    ///
    /// Every recipe task is a copy with a fresh id so the recipe is
    /// independent of later library edits. Unknown ids are skipped.
    pub fn create(
        &mut self,
        name: &str,
        description: &str,
        task_ids: &[TaskId],
        library: &TaskCatalog,
    ) -> Result<Recipe, CatalogError> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(CatalogError::BlankName);
        }
        if description.is_empty() {
            return Err(CatalogError::BlankDescription);
        }

        let tasks: Vec<Task> = library
            .list()
            .iter()
            .filter(|task| task_ids.contains(&task.id))
            .map(|task| Task::new(Uuid::new_v4().to_string(), task.name.clone(), task.hours))
            .collect();
        if tasks.is_empty() {
            return Err(CatalogError::EmptySelection);
        }

        let recipe = Recipe::new(Uuid::new_v4().to_string(), name, description, tasks);
        self.recipes.push(recipe.clone());
        Ok(recipe)
    }

    pub fn remove(&mut self, id: &str) -> Option<Recipe> {
        let index = self.recipes.iter().position(|recipe| recipe.id == id)?;
        Some(self.recipes.remove(index))
    }
}
