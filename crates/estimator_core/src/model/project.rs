//! Project snapshot exchanged with persistence, export and share layers.
//!
//! # Invariants
//! - A snapshot is the full proposal state: roster plus burn plan.
//! - Loading a snapshot replaces state wholesale; nothing is derived from
//!   the state it replaces.

use crate::model::burn_plan::BurnPlan;
use crate::model::personnel::Personnel;
use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Authenticated account identity that owns saved projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Returns `None` for blank identities.
    pub fn parse(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain structured snapshot of a proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub personnel: Vec<Personnel>,
    pub burn_plan: BurnPlan,
}

impl ProjectSnapshot {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        for person in &self.personnel {
            person.validate()?;
        }
        self.burn_plan.validate()
    }

    /// Collapses duplicate allocation keys in every week.
    ///
    /// Returns how many duplicate records were merged away.
    pub fn merge_duplicate_allocations(&mut self) -> usize {
        self.burn_plan
            .weeks
            .iter_mut()
            .map(|week| week.merge_duplicate_allocations())
            .sum()
    }
}
