//! Shared validation error for model records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for proposal model records.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Numeric field is negative, NaN or infinite.
    InvalidAmount { field: &'static str, value: f64 },
    /// Identifier field is blank after trim.
    EmptyIdentifier(&'static str),
    /// Week range ends before it starts or spans more than seven days.
    InvalidWeekRange { start: String, end: String },
    /// One person holds two task instances with the same id.
    DuplicateTask { personnel: String, task_id: String },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount { field, value } => {
                write!(f, "{field} must be a non-negative number, got {value}")
            }
            Self::EmptyIdentifier(field) => write!(f, "{field} must not be blank"),
            Self::InvalidWeekRange { start, end } => {
                write!(f, "invalid week range {start}..{end}")
            }
            Self::DuplicateTask { personnel, task_id } => {
                write!(f, "personnel {personnel} holds task {task_id} more than once")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Rejects negative and non-finite amounts (rates, hours).
pub fn ensure_amount(field: &'static str, value: f64) -> Result<(), ModelValidationError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ModelValidationError::InvalidAmount { field, value })
}
