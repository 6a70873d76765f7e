//! Contracts for the external task and calendar sources.
//!
//! The core only reads from these: each call returns a fresh snapshot and
//! nothing is ever written back. Accepting and persisting a plan is the
//! caller's job.

mod json;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::task::Task;
use crate::timeline::{overlaps, TimeBlock};

pub use json::{JsonBlockFile, JsonTaskFile};

/// Supplies the user's pending tasks.
pub trait TaskSource: Send + Sync {
    /// Current snapshot of incomplete tasks.
    fn pending_tasks(&self) -> Result<Vec<Task>>;
}

/// Supplies committed calendar intervals.
pub trait TimeBlockSource: Send + Sync {
    /// Committed blocks intersecting `[start, end)`.
    fn blocks_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeBlock>>;
}

impl TaskSource for Vec<Task> {
    fn pending_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.iter().filter(|t| !t.completed).cloned().collect())
    }
}

impl TimeBlockSource for Vec<TimeBlock> {
    fn blocks_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TimeBlock>> {
        Ok(within(self, start, end))
    }
}

pub(crate) fn within(blocks: &[TimeBlock], start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<TimeBlock> {
    blocks
        .iter()
        .filter(|b| overlaps(b.start_time, b.end_time, start, end))
        .cloned()
        .collect()
}
