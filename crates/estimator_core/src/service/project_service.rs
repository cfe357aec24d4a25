//! Saved-project use-case service.
//!
//! # Responsibility
//! - Gate persistence behind an authenticated identity.
//! - Move snapshots between a `ProposalSession` and the repository.
//!
//! # Invariants
//! - Nothing reaches the repository without an identity and a non-blank name.
//! - A failed load leaves the session exactly as it was.

use crate::model::project::UserId;
use crate::model::validation::ModelValidationError;
use crate::repo::project_repo::{ProjectId, ProjectRepository, RepoError, SavedProject};
use crate::service::proposal_service::ProposalSession;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced to callers of `ProjectService`.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// No signed-in identity.
    Unauthenticated,
    /// Project name is blank after trimming.
    InvalidName,
    ProjectNotFound(ProjectId),
    /// Snapshot failed model validation.
    InvalidPayload(ModelValidationError),
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "sign in to manage saved projects"),
            Self::InvalidName => write!(f, "please enter a project name"),
            Self::ProjectNotFound(id) => write!(f, "saved project not found: {id}"),
            Self::InvalidPayload(err) => write!(f, "invalid project payload: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPayload(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProjectNotFound(id),
            RepoError::Validation(err) => Self::InvalidPayload(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ModelValidationError> for ProjectServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::InvalidPayload(value)
    }
}

pub type ServiceResult<T> = Result<T, ProjectServiceError>;

/// Use-case service for the saved-project lifecycle.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
    identity: Option<UserId>,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a signed-out service.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            identity: None,
        }
    }

    pub fn with_identity(repo: R, identity: UserId) -> Self {
        Self {
            repo,
            identity: Some(identity),
        }
    }

    pub fn sign_in(&mut self, identity: UserId) {
        info!("event=auth_sign_in module=service status=ok");
        self.identity = Some(identity);
    }

    pub fn sign_out(&mut self) {
        info!("event=auth_sign_out module=service status=ok");
        self.identity = None;
    }

    pub fn identity(&self) -> Option<&UserId> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Saves the session state as a new project.
    pub fn save_project(
        &self,
        name: &str,
        session: &ProposalSession,
    ) -> ServiceResult<SavedProject> {
        let owner = self.require_identity("project_save")?;
        let name = normalize_name(name)?;
        let saved = self.repo.create_project(owner, name, &session.snapshot())?;
        info!(
            "event=project_save module=service status=ok project_id={} personnel={}",
            saved.id,
            saved.snapshot.personnel.len()
        );
        Ok(saved)
    }

    /// Overwrites an existing project with the session state.
    pub fn update_project(
        &self,
        id: ProjectId,
        name: &str,
        session: &ProposalSession,
    ) -> ServiceResult<SavedProject> {
        let owner = self.require_identity("project_update")?;
        let name = normalize_name(name)?;
        let saved = self.repo.update_project(owner, id, name, &session.snapshot())?;
        info!("event=project_update module=service status=ok project_id={id}");
        Ok(saved)
    }

    /// Lists the caller's projects, most recently updated first.
    pub fn list_projects(&self) -> ServiceResult<Vec<SavedProject>> {
        let owner = self.require_identity("project_list")?;
        Ok(self.repo.list_projects(owner)?)
    }

    pub fn delete_project(&self, id: ProjectId) -> ServiceResult<()> {
        let owner = self.require_identity("project_delete")?;
        self.repo.delete_project(owner, id)?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }

    /// Loads a saved project into `session`, replacing its state wholesale.
    pub fn load_project(
        &self,
        id: ProjectId,
        session: &mut ProposalSession,
    ) -> ServiceResult<SavedProject> {
        let owner = self.require_identity("project_load")?;
        let saved = self
            .repo
            .get_project(owner, id)?
            .ok_or(ProjectServiceError::ProjectNotFound(id))?;
        session.load(saved.snapshot.clone())?;
        Ok(saved)
    }

    fn require_identity(&self, event: &str) -> ServiceResult<&UserId> {
        self.identity.as_ref().ok_or_else(|| {
            warn!("event={event} module=service status=rejected reason=unauthenticated");
            ProjectServiceError::Unauthenticated
        })
    }
}

fn normalize_name(name: &str) -> ServiceResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProjectServiceError::InvalidName);
    }
    Ok(trimmed)
}
