//! Saved-project repository contract and SQLite implementation.
//!
//! # Invariants
//! - Rows are only visible to the `user_id` that wrote them.
//! - `data` holds the JSON-encoded `ProjectSnapshot`.
//! - Listing order is `updated_at DESC, id ASC`; undecodable rows are
//!   left out of listings and reported by `get_project`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::project::{ProjectSnapshot, UserId};
use crate::model::validation::ModelValidationError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    name,
    data,
    created_at,
    updated_at
FROM saved_projects";

/// Stable identifier of a saved project.
pub type ProjectId = Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for saved-project persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound(ProjectId),
    /// Connection has not been migrated to the version this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "saved project not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "project repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid saved project data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One persisted project with its full payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedProject {
    pub id: ProjectId,
    pub owner: UserId,
    pub name: String,
    pub snapshot: ProjectSnapshot,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

/// Persistence contract for saved projects.
pub trait ProjectRepository {
    fn create_project(
        &self,
        owner: &UserId,
        name: &str,
        snapshot: &ProjectSnapshot,
    ) -> RepoResult<SavedProject>;
    fn update_project(
        &self,
        owner: &UserId,
        id: ProjectId,
        name: &str,
        snapshot: &ProjectSnapshot,
    ) -> RepoResult<SavedProject>;
    fn get_project(&self, owner: &UserId, id: ProjectId) -> RepoResult<Option<SavedProject>>;
    /// Lists full payloads, most recently updated first.
    ///
    /// Rows whose payload no longer decodes or validates are skipped.
    fn list_projects(&self, owner: &UserId) -> RepoResult<Vec<SavedProject>>;
    fn delete_project(&self, owner: &UserId, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed saved-project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Creates a repository over a fully migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(
        &self,
        owner: &UserId,
        name: &str,
        snapshot: &ProjectSnapshot,
    ) -> RepoResult<SavedProject> {
        snapshot.validate()?;
        let id = Uuid::new_v4();
        let now = now_epoch_ms();

        self.conn.execute(
            "INSERT INTO saved_projects (id, user_id, name, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
            params![
                id.to_string(),
                owner.as_str(),
                name,
                encode_snapshot(snapshot)?,
                now
            ],
        )?;

        self.get_project(owner, id)?
            .ok_or_else(|| {
                RepoError::InvalidData(format!("created project {id} missing on read-back"))
            })
    }

    fn update_project(
        &self,
        owner: &UserId,
        id: ProjectId,
        name: &str,
        snapshot: &ProjectSnapshot,
    ) -> RepoResult<SavedProject> {
        snapshot.validate()?;
        let changed = self.conn.execute(
            "UPDATE saved_projects
             SET
                name = ?1,
                data = ?2,
                updated_at = ?3
             WHERE id = ?4
               AND user_id = ?5;",
            params![
                name,
                encode_snapshot(snapshot)?,
                now_epoch_ms(),
                id.to_string(),
                owner.as_str()
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get_project(owner, id)?.ok_or(RepoError::NotFound(id))
    }

    fn get_project(&self, owner: &UserId, id: ProjectId) -> RepoResult<Option<SavedProject>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE id = ?1
               AND user_id = ?2;"
        ))?;
        let raw = stmt
            .query_row(params![id.to_string(), owner.as_str()], RawProjectRow::from_row)
            .optional()?;
        raw.map(RawProjectRow::into_saved_project).transpose()
    }

    fn list_projects(&self, owner: &UserId) -> RepoResult<Vec<SavedProject>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY updated_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([owner.as_str()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            let raw = RawProjectRow::from_row(row)?;
            let row_id = raw.id.clone();
            match raw.into_saved_project() {
                Ok(project) => projects.push(project),
                Err(err) => warn!(
                    "event=project_list module=repo status=skip project_id={row_id} error={err}"
                ),
            }
        }
        Ok(projects)
    }

    fn delete_project(&self, owner: &UserId, id: ProjectId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM saved_projects WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), owner.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

struct RawProjectRow {
    id: String,
    user_id: String,
    name: String,
    data: String,
    created_at: i64,
    updated_at: i64,
}

impl RawProjectRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            data: row.get("data")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_saved_project(self) -> RepoResult<SavedProject> {
        let id = Uuid::parse_str(&self.id).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid `{}` in saved_projects.id", self.id))
        })?;
        let owner = UserId::parse(&self.user_id).ok_or_else(|| {
            RepoError::InvalidData(format!("blank user_id for saved project {id}"))
        })?;
        let snapshot: ProjectSnapshot = serde_json::from_str(&self.data).map_err(|err| {
            RepoError::InvalidData(format!("undecodable payload for saved project {id}: {err}"))
        })?;
        snapshot.validate()?;

        Ok(SavedProject {
            id,
            owner,
            name: self.name,
            snapshot,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn encode_snapshot(snapshot: &ProjectSnapshot) -> RepoResult<String> {
    serde_json::to_string(snapshot)
        .map_err(|err| RepoError::InvalidData(format!("unencodable project payload: {err}")))
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
