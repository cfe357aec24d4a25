//! Task templates and per-person task instances.
//!
//! # Responsibility
//! - Define the single identifier space shared by catalog, recipe and
//!   custom tasks.
//! - Mint independent instance ids when a template is copied onto a person.
//!
//! # Invariants
//! - Equality of tasks for attach/dedup purposes is `TaskId` equality.
//! - A minted id keeps its source id as prefix, separated by `@`.
//! - `hours` is finite and non-negative.

use crate::model::validation::{ensure_amount, ModelValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const MINT_SEPARATOR: char = '@';
const CUSTOM_PREFIX: &str = "custom-";

/// Identifier for task templates and attached task instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the template id this instance was minted from.
    ///
    /// Ids that were never minted are their own source.
    pub fn source(&self) -> &str {
        match self.0.split_once(MINT_SEPARATOR) {
            Some((source, _)) => source,
            None => self.0.as_str(),
        }
    }

    /// Mints a fresh, globally unique id that keeps the same source.
    pub fn mint(&self) -> Self {
        Self(format!(
            "{}{MINT_SEPARATOR}{}",
            self.source(),
            Uuid::new_v4().simple()
        ))
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Task template (catalog entry) or owned task instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Estimated hours. Fractional values are allowed.
    pub hours: f64,
    /// `true` for user-authored tasks, `false` for catalog-sourced ones.
    #[serde(default)]
    pub custom: bool,
}

impl Task {
    /// Creates a catalog-sourced task.
    pub fn new(id: impl Into<TaskId>, name: impl Into<String>, hours: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hours,
            custom: false,
        }
    }

    /// Creates a user-authored task with a generated `custom-<uuid>` id.
    pub fn custom(name: impl Into<String>, hours: f64) -> Self {
        Self {
            id: TaskId::new(format!("{CUSTOM_PREFIX}{}", Uuid::new_v4())),
            name: name.into(),
            hours,
            custom: true,
        }
    }

    /// Copies this template with a freshly minted instance id.
    pub fn minted_copy(&self) -> Self {
        Self {
            id: self.id.mint(),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_blank() {
            return Err(ModelValidationError::EmptyIdentifier("task.id"));
        }
        ensure_amount("task.hours", self.hours)
    }
}
