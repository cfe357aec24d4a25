//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, reconciler and repository calls into use-case APIs.
//! - Keep CLI callers decoupled from storage and transport details.

pub mod project_service;
pub mod proposal_service;
pub mod share_service;
