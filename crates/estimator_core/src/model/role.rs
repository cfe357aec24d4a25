//! Role reference data.
//!
//! # Invariants
//! - Roles are copied onto personnel by value; later catalog edits never
//!   reach an already-assigned role.
//! - `default_rate` is finite and non-negative.

use crate::model::validation::{ensure_amount, ModelValidationError};
use serde::{Deserialize, Serialize};

/// Stable role identifier, e.g. `sr-associate`.
pub type RoleId = String;

/// Billable role with its default hourly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Display title used for export columns and cost grouping.
    pub title: String,
    /// Hourly rate copied onto a person whenever this role is selected.
    pub default_rate: f64,
}

impl Role {
    pub fn new(id: impl Into<RoleId>, title: impl Into<String>, default_rate: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            default_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.trim().is_empty() {
            return Err(ModelValidationError::EmptyIdentifier("role.id"));
        }
        ensure_amount("role.default_rate", self.default_rate)
    }
}
