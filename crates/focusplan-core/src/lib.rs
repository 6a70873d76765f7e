//! # focusplan Core Library
//!
//! This library provides the scheduling core of focusplan: it takes pending
//! tasks, the user's current energy and the already-committed calendar for a
//! day, and proposes a non-conflicting placement of tasks into free slots.
//! Rendering, persistence and provider integrations live outside; the core
//! only reads snapshots and returns new values.
//!
//! ## Architecture
//!
//! - **Scheduler**: greedy first-fit placement of energy-eligible tasks,
//!   splitting long tasks into bounded fragments
//! - **Load evaluator**: total scheduled hours and an overload flag
//! - **Energy inference**: heuristic energy level for tasks without one
//! - **Sources**: read-only task and calendar contracts
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`AutoScheduler`]: Task placement engine
//! - [`check_burnout`]: Daily load evaluation
//! - [`Planner`]: Schedule-then-evaluate flow over [`TaskSource`] and [`TimeBlockSource`]
//! - [`Config`]: Application configuration management

pub mod energy;
pub mod error;
pub mod load;
pub mod planner;
pub mod scheduler;
pub mod sources;
pub mod storage;
pub mod task;
pub mod timeline;

pub use energy::calculate_task_energy;
pub use error::{ConfigError, CoreError, ValidationError};
pub use load::{check_burnout, BurnoutReport, DEFAULT_LIMIT_HOURS};
pub use planner::{DayPlan, Planner};
pub use scheduler::{AutoScheduler, ScheduleResult, ScheduledTask, SchedulerConfig, SearchWindow};
pub use sources::{JsonBlockFile, JsonTaskFile, TaskSource, TimeBlockSource};
pub use storage::Config;
pub use task::{split_task, EnergyLevel, SplitPolicy, Task};
pub use timeline::{find_gaps, Interval, TaskRef, TimeBlock, TimeGap};
