//! File-backed tracker: one JSON store holding every job record by name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::jobs::{JobError, JobRecord, JobStatus, JobTracker};

pub struct FileTracker {
    path: PathBuf,
    job_name: String,
    job_group: Option<String>,
}

impl FileTracker {
    /// Open the store at `path`, registering the job if it is not yet there.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Io` or `JobError::Parse` if an existing store
    /// cannot be read.
    pub fn open(
        path: PathBuf,
        job_name: &str,
        job_group: Option<String>,
    ) -> Result<Self, JobError> {
        let tracker = Self {
            path,
            job_name: job_name.to_string(),
            job_group: job_group.clone(),
        };

        let mut store = tracker.load()?;
        store
            .entry(tracker.job_name.clone())
            .or_insert_with(|| JobRecord::new(job_name, job_group));
        tracker.save(&store)?;

        Ok(tracker)
    }

    fn load(&self) -> Result<BTreeMap<String, JobRecord>, JobError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, store: &BTreeMap<String, JobRecord>) -> Result<(), JobError> {
        let json = serde_json::to_string_pretty(store)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    #[must_use]
    pub fn store_path(&self) -> &Path {
        &self.path
    }
}

impl JobTracker for FileTracker {
    fn update(&mut self, status: Option<JobStatus>, stage: Option<&str>) -> Result<(), JobError> {
        let mut store = self.load()?;
        let record = store
            .get_mut(&self.job_name)
            .ok_or_else(|| JobError::NotFound(self.job_name.clone()))?;

        if let Some(status) = status {
            record.status = status;
        }
        if let Some(stage) = stage {
            record.stage = Some(stage.to_string());
        }
        record.updated_at = Utc::now();

        self.save(&store)
    }

    fn job(&self) -> Result<JobRecord, JobError> {
        let store = self.load()?;
        store
            .get(&self.job_name)
            .cloned()
            .ok_or_else(|| JobError::NotFound(self.job_name.clone()))
    }

    fn jobs_in_group(&self) -> Result<Vec<JobRecord>, JobError> {
        let store = self.load()?;
        Ok(store
            .into_values()
            .filter(|record| record.group == self.job_group)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");

        let mut tracker = FileTracker::open(path.clone(), "job1", None).unwrap();
        tracker
            .update(Some(JobStatus::Running), Some("matching"))
            .unwrap();

        // a second handle sees the persisted state
        let reopened = FileTracker::open(path, "job1", None).unwrap();
        let record = reopened.job().unwrap();
        assert_eq!(record.status, JobStatus::Running);
        assert_eq!(record.stage.as_deref(), Some("matching"));
    }

    #[test]
    fn test_reopen_preserves_created_at() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");

        let tracker = FileTracker::open(path.clone(), "job1", None).unwrap();
        let created = tracker.job().unwrap().created_at;

        let reopened = FileTracker::open(path, "job1", None).unwrap();
        assert_eq!(reopened.job().unwrap().created_at, created);
    }

    #[test]
    fn test_jobs_in_group_filters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");

        let _a = FileTracker::open(path.clone(), "a", Some("batch1".to_string())).unwrap();
        let _b = FileTracker::open(path.clone(), "b", Some("batch1".to_string())).unwrap();
        let _c = FileTracker::open(path.clone(), "c", Some("batch2".to_string())).unwrap();

        let tracker = FileTracker::open(path, "a", Some("batch1".to_string())).unwrap();
        let group = tracker.jobs_in_group().unwrap();
        let names: Vec<&str> = group.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_job_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");

        let tracker = FileTracker::open(path.clone(), "job1", None).unwrap();
        // simulate an external wipe of the store
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(tracker.job(), Err(JobError::NotFound(_))));
    }
}
