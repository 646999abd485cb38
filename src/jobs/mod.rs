//! Pluggable job-status tracking for pipeline runs.
//!
//! Long multi-stage runs report their lifecycle through the [`JobTracker`]
//! trait: one interface, independent backend variants, selected by a
//! configuration-driven factory ([`tracker_for`]) mapping a backend name to a
//! constructor.
//!
//! Two backends are provided:
//!
//! - [`NullTracker`] — keeps the record in memory and stores nothing; the
//!   default, and the fallback call sites can rely on unconditionally.
//! - [`FileTracker`] — persists records as JSON in a single store file,
//!   keyed by job name.
//!
//! Database-backed variants would implement the same trait behind the same
//! factory.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod file;
pub mod null;

pub use file::FileTracker;
pub use null::NullTracker;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("Job not found: {0}")]
    NotFound(String),

    #[error("Unknown job tracker backend: {0}")]
    UnknownBackend(String),

    #[error("Invalid tracker configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse job store: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lifecycle status of a tracked job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Initialized,
    Pending,
    Running,
    Done,
    /// Job failed due to an error in the pipeline itself
    Failed,
    /// Job was terminated externally
    Terminated,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Initialized => "initialized",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Terminated => "terminated",
        };
        write!(f, "{s}")
    }
}

/// One job's tracked state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,

    /// Group the job belongs to, when runs are batched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    pub status: JobStatus,

    /// Pipeline stage the job last reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, group: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            group,
            status: JobStatus::Initialized,
            stage: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Status reporting interface implemented by every tracker backend.
pub trait JobTracker {
    /// Report a status and/or stage change.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific error if the update cannot be recorded.
    fn update(&mut self, status: Option<JobStatus>, stage: Option<&str>) -> Result<(), JobError>;

    /// Fetch this job's current record.
    ///
    /// # Errors
    ///
    /// Returns `JobError::NotFound` if the job is absent from the backend.
    fn job(&self) -> Result<JobRecord, JobError>;

    /// Fetch all records sharing this job's group.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific error if the store cannot be read.
    fn jobs_in_group(&self) -> Result<Vec<JobRecord>, JobError>;
}

/// Tracker selection, from configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Backend name: `null` or `file`
    pub backend: String,
    pub job_name: String,
    pub job_group: Option<String>,
    /// Store location, required by the `file` backend
    pub store_path: Option<PathBuf>,
}

/// Construct the tracker named by the configuration.
///
/// # Errors
///
/// Returns `JobError::UnknownBackend` for an unrecognized name, or
/// `JobError::InvalidConfig` when the backend's requirements are not met.
pub fn tracker_for(config: &TrackerConfig) -> Result<Box<dyn JobTracker>, JobError> {
    match config.backend.as_str() {
        "null" => Ok(Box::new(NullTracker::new(
            &config.job_name,
            config.job_group.clone(),
        ))),
        "file" => {
            let path = config.store_path.clone().ok_or_else(|| {
                JobError::InvalidConfig("the 'file' backend requires a store path".to_string())
            })?;
            Ok(Box::new(FileTracker::open(
                path,
                &config.job_name,
                config.job_group.clone(),
            )?))
        }
        other => Err(JobError::UnknownBackend(other.to_string())),
    }
}
