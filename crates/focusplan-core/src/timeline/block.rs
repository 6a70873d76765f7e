//! Committed and proposed calendar intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interval::Interval;
use crate::error::ValidationError;
use crate::task::EnergyLevel;

/// Denormalized task details carried by a block for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub title: String,
    pub energy_level: EnergyLevel,
}

/// A committed or proposed interval of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    #[serde(default)]
    pub task_ref: Option<TaskRef>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Proposed placement awaiting user confirmation
    #[serde(default)]
    pub is_ghost: bool,
}

impl TimeBlock {
    /// Create a committed block
    pub fn new(id: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            task_ref: None,
            start_time,
            end_time,
            is_ghost: false,
        }
    }

    pub fn with_task_ref(mut self, title: impl Into<String>, energy_level: EnergyLevel) -> Self {
        self.task_ref = Some(TaskRef {
            title: title.into(),
            energy_level,
        });
        self
    }

    /// Check `start_time < end_time`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time >= self.end_time {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }
}

impl Interval for TimeBlock {
    fn start(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end(&self) -> DateTime<Utc> {
        self.end_time
    }
}
