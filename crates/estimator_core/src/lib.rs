//! Core domain logic for the proposal estimator.
//! This crate is the single source of truth for staffing, burn plan and cost
//! invariants.

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod cost;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod repo;
pub mod service;

pub use catalog::{CatalogError, Catalogs, RecipeCatalog, RoleCatalog, TaskCatalog};
pub use config::{ConfigError, EstimatorConfig};
pub use cost::{CostSummary, RoleCostLine, PROFIT_MARGIN};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::burn_plan::{Allocation, BurnPlan, WeekRange};
pub use model::personnel::{Personnel, PersonnelId};
pub use model::project::{ProjectSnapshot, UserId};
pub use model::recipe::{Recipe, RecipeId};
pub use model::role::{Role, RoleId};
pub use model::roster::Roster;
pub use model::task::{Task, TaskId};
pub use model::validation::ModelValidationError;
pub use reconcile::{AllocationStatus, AllocationSummary, Regeneration};
pub use repo::project_repo::{
    ProjectId, ProjectRepository, RepoError, RepoResult, SavedProject, SqliteProjectRepository,
};
pub use service::project_service::{ProjectService, ProjectServiceError};
pub use service::proposal_service::ProposalSession;
pub use service::share_service::{
    DeliveryError, EmailSender, ProposalEmail, ShareError, ShareService,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
