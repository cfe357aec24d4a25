//! Reference catalogs injected into proposal sessions.
//!
//! # Responsibility
//! - Own the role table, the task library, the shared task set attached to
//!   every new person, and the recipe table.
//! - Hand out snapshots so attached instances never follow later edits.
//!
//! # Invariants
//! - Catalogs are explicit values owned by their caller, not global state.
//! - Removing a catalog entry never alters tasks already attached to people.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod recipes;
pub mod roles;
mod seed;
pub mod tasks;

pub use recipes::RecipeCatalog;
pub use roles::RoleCatalog;
pub use tasks::TaskCatalog;

/// Validation failures for catalog edits.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Name is blank after trim.
    BlankName,
    /// Description is blank after trim.
    BlankDescription,
    /// Estimated hours must be a positive finite number.
    InvalidHours(f64),
    /// Recipe selection contains no known catalog task.
    EmptySelection,
    /// Entry id is already present.
    DuplicateId(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
            Self::BlankDescription => write!(f, "description must not be blank"),
            Self::InvalidHours(value) => {
                write!(f, "hours must be a positive number, got {value}")
            }
            Self::EmptySelection => write!(f, "select at least one task"),
            Self::DuplicateId(id) => write!(f, "catalog id already registered: {id}"),
        }
    }
}

impl Error for CatalogError {}

/// Bundle of catalogs consumed by one proposal session.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub roles: RoleCatalog,
    /// Library shown for manual attach; accepts custom tasks.
    pub library: TaskCatalog,
    /// Tasks copied onto every newly added person.
    pub shared_tasks: TaskCatalog,
    pub recipes: RecipeCatalog,
}

impl Catalogs {
    /// Built-in roles, task library and recipes; no shared tasks.
    pub fn seeded() -> Self {
        Self {
            roles: RoleCatalog::seeded(),
            library: TaskCatalog::seeded_library(),
            shared_tasks: TaskCatalog::new(),
            recipes: RecipeCatalog::seeded(),
        }
    }
}
