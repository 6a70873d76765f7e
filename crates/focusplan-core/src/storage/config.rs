//! TOML-based application configuration.
//!
//! Stores scheduling preferences:
//! - Working window and overflow allowance
//! - Slot scan granularity and task split sizes
//! - Daily burnout threshold
//!
//! Configuration is stored at `~/.config/focusplan/config.toml` and is turned
//! into an explicit [`SchedulerConfig`] for each run; nothing is cached
//! process-wide.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::load::DEFAULT_LIMIT_HOURS;
use crate::scheduler::SchedulerConfig;

/// Scheduler-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSettings {
    #[serde(default = "default_work_start_hour")]
    pub work_start_hour: u32,
    #[serde(default = "default_work_end_hour")]
    pub work_end_hour: u32,
    #[serde(default = "default_overflow_hours")]
    pub overflow_hours: u32,
    #[serde(default = "default_slot_step_minutes")]
    pub slot_step_minutes: u32,
    #[serde(default = "default_max_chunk_minutes")]
    pub max_chunk_minutes: u32,
    #[serde(default = "default_split_chunk_minutes")]
    pub split_chunk_minutes: u32,
}

/// Load evaluation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnoutSettings {
    #[serde(default = "default_limit_hours")]
    pub limit_hours: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusplan/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub burnout: BurnoutSettings,
}

// Default functions
fn default_work_start_hour() -> u32 {
    9
}
fn default_work_end_hour() -> u32 {
    17
}
fn default_overflow_hours() -> u32 {
    4
}
fn default_slot_step_minutes() -> u32 {
    15
}
fn default_max_chunk_minutes() -> u32 {
    90
}
fn default_split_chunk_minutes() -> u32 {
    60
}
fn default_limit_hours() -> f64 {
    DEFAULT_LIMIT_HOURS
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            work_start_hour: default_work_start_hour(),
            work_end_hour: default_work_end_hour(),
            overflow_hours: default_overflow_hours(),
            slot_step_minutes: default_slot_step_minutes(),
            max_chunk_minutes: default_max_chunk_minutes(),
            split_chunk_minutes: default_split_chunk_minutes(),
        }
    }
}

impl Default for BurnoutSettings {
    fn default() -> Self {
        Self {
            limit_hours: default_limit_hours(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let unparsable = |expected: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("cannot parse '{value}' as {expected}"),
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| unparsable("bool"))?,
                    ),
                    serde_json::Value::Number(n) if n.is_f64() => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| unparsable("number"))?,
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| unparsable("non-negative integer"))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: "cannot set a whole section".to_string(),
                        });
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result is not a coherent configuration. `self` is left
    /// untouched on error.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Update a value and persist to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }

    /// Check the settings describe a usable scheduler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler_config().validate().map_err(|e| ConfigError::InvalidValue {
            key: "scheduler".to_string(),
            message: e.to_string(),
        })?;
        if !self.burnout.limit_hours.is_finite() || self.burnout.limit_hours < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "burnout.limit_hours".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }

    /// Explicit scheduler configuration for one run.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        let s = &self.scheduler;
        SchedulerConfig {
            work_start_hour: s.work_start_hour,
            work_end_hour: s.work_end_hour,
            overflow_hours: s.overflow_hours,
            slot_step_minutes: s.slot_step_minutes,
            max_chunk_minutes: s.max_chunk_minutes,
            split_chunk_minutes: s.split_chunk_minutes,
        }
    }
}
