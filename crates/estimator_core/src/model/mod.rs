//! Proposal domain model.
//!
//! # Responsibility
//! - Define the value types shared by roster, burn-plan and cost logic.
//! - Own per-record validation (`validate()`) used before persistence and
//!   after loading external payloads.
//!
//! # Invariants
//! - Bill rates and task hours are finite and non-negative.
//! - Task instances are compared by `TaskId`, never by object identity.
//! - At most one allocation exists per (week, personnel, task).

pub mod burn_plan;
pub mod personnel;
pub mod project;
pub mod recipe;
pub mod role;
pub mod roster;
pub mod task;
pub mod validation;
