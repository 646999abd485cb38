//! Zero-persistence tracker: accepts every update, stores nothing.
//!
//! Used as the default so pipeline call sites can report status
//! unconditionally.

use chrono::Utc;

use crate::jobs::{JobError, JobRecord, JobStatus, JobTracker};

pub struct NullTracker {
    record: JobRecord,
}

impl NullTracker {
    #[must_use]
    pub fn new(job_name: &str, job_group: Option<String>) -> Self {
        Self {
            record: JobRecord::new(job_name, job_group),
        }
    }
}

impl JobTracker for NullTracker {
    fn update(&mut self, status: Option<JobStatus>, stage: Option<&str>) -> Result<(), JobError> {
        if let Some(status) = status {
            self.record.status = status;
        }
        if let Some(stage) = stage {
            self.record.stage = Some(stage.to_string());
        }
        self.record.updated_at = Utc::now();
        Ok(())
    }

    fn job(&self) -> Result<JobRecord, JobError> {
        Ok(self.record.clone())
    }

    fn jobs_in_group(&self) -> Result<Vec<JobRecord>, JobError> {
        Ok(vec![self.record.clone()])
    }
}
