//! Runtime configuration for estimator hosts.
//!
//! # Responsibility
//! - Load optional TOML configuration with per-field defaults.
//!
//! # Invariants
//! - A missing config file is not an error; defaults apply.
//! - The profit margin is not configurable (see `cost::PROFIT_MARGIN`).

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_ROLE_ID: &str = "sr-associate";
const DEFAULT_PROJECT_WEEKS: u32 = 4;
const DEFAULT_PERSON_NAME_PREFIX: &str = "Resource";

/// Estimator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Role assigned to newly added personnel.
    pub default_role_id: String,
    /// Length of a fresh project's burn plan, counted in weeks from today.
    pub project_weeks: u32,
    /// New personnel are named `<prefix> <n>`.
    pub person_name_prefix: String,
    /// Task library ids copied onto every newly added person.
    pub shared_task_ids: Vec<String>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite database for saved projects; in-memory when unset.
    pub db_path: Option<PathBuf>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_role_id: DEFAULT_ROLE_ID.to_string(),
            project_weeks: DEFAULT_PROJECT_WEEKS,
            person_name_prefix: DEFAULT_PERSON_NAME_PREFIX.to_string(),
            shared_task_ids: Vec::new(),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl EstimatorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Parse)
    }

    /// Loads `path` when it exists, otherwise returns defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        Self::from_toml_str(&source)
    }

    /// Inclusive day span of a fresh project's burn plan.
    pub fn project_length_days(&self) -> i64 {
        i64::from(self.project_weeks) * 7
    }
}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}
