//! Task types consumed by the scheduler.
//!
//! Tasks are owned by an external task source; the core only reads
//! snapshots of them and returns new values.

pub mod split;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub use split::{split_task, SplitPolicy};

/// Energy level for task scheduling.
///
/// Classifies both the intensity a task demands and the capacity a user
/// currently has. Scheduling eligibility compares the two by rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Low energy (e.g., end of day)
    Low,
    /// Medium energy (default)
    Medium,
    /// High energy (e.g., morning)
    High,
}

impl EnergyLevel {
    /// Numeric rank: low=1, medium=2, high=3.
    pub fn rank(self) -> u8 {
        match self {
            EnergyLevel::Low => 1,
            EnergyLevel::Medium => 2,
            EnergyLevel::High => 3,
        }
    }

    /// Whether a task demanding `self` may be assigned to a user at `capacity`.
    pub fn fits_within(self, capacity: EnergyLevel) -> bool {
        self.rank() <= capacity.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(ValidationError::invalid_value(
                "energy_level",
                format!("unknown energy level '{other}' (expected low, medium or high)"),
            )),
        }
    }
}

/// A unit of work to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier. Split fragments derive `{id}-part{N}`.
    pub id: String,
    /// Display label
    pub title: String,
    /// Explicit energy requirement; inferred when absent
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    /// Total time required, in minutes
    pub duration_minutes: u32,
    /// Completed tasks are never scheduled
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an incomplete task with no explicit energy level.
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            energy_level: None,
            duration_minutes,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Set an explicit energy level.
    pub fn with_energy(mut self, level: EnergyLevel) -> Self {
        self.energy_level = Some(level);
        self
    }

    /// Mark the task as completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// The energy level used for eligibility and ordering.
    pub fn effective_energy(&self) -> EnergyLevel {
        crate::energy::calculate_task_energy(self)
    }

    /// Reject tasks the scheduler cannot reason about.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_minutes == 0 {
            return Err(ValidationError::invalid_value(
                "duration_minutes",
                format!("task '{}' must have a positive duration", self.id),
            ));
        }
        Ok(())
    }
}
