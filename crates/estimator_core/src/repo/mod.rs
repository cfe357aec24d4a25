//! Repository layer for saved projects.
//!
//! # Responsibility
//! - Define the persistence contract consumed by the project service.
//! - Keep SQL details behind that contract.
//!
//! # Invariants
//! - Every query is scoped to one owner; foreign rows behave as missing.
//! - Payloads are validated before writes and after reads.

pub mod project_repo;
