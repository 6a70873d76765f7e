//! File-backed sources reading JSON arrays.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{within, TaskSource, TimeBlockSource};
use crate::error::Result;
use crate::task::Task;
use crate::timeline::TimeBlock;

/// Tasks stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonTaskFile {
    path: PathBuf,
}

impl JsonTaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskSource for JsonTaskFile {
    fn pending_tasks(&self) -> Result<Vec<Task>> {
        let content = std::fs::read_to_string(&self.path)?;
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks.into_iter().filter(|t| !t.completed).collect())
    }
}

/// Committed time blocks stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonBlockFile {
    path: PathBuf,
}

impl JsonBlockFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TimeBlockSource for JsonBlockFile {
    fn blocks_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeBlock>> {
        let content = std::fs::read_to_string(&self.path)?;
        let blocks: Vec<TimeBlock> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = blocks.len(), "loaded blocks");
        Ok(within(&blocks, start, end))
    }
}
