//! Day planning: snapshot the sources, schedule, and evaluate the load.
//!
//! The planner is the glue a caller would otherwise write by hand. It reads
//! one snapshot from each source, proposes placements as ghost blocks,
//! merges them with the committed blocks and runs the load evaluator over
//! the merged day. It never writes anything back to a source.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::load::{check_burnout, BurnoutReport, DEFAULT_LIMIT_HOURS};
use crate::scheduler::{day_bounds, AutoScheduler, ScheduleResult, SchedulerConfig, SearchWindow};
use crate::sources::{TaskSource, TimeBlockSource};
use crate::storage::Config;
use crate::task::EnergyLevel;
use crate::timeline::{find_gaps, TimeBlock, TimeGap};

/// Smallest free window reported back to the caller (minutes).
const MIN_FREE_GAP_MINUTES: i64 = 15;

/// A proposed plan for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub result: ScheduleResult,
    /// Committed blocks read from the calendar source
    pub existing: Vec<TimeBlock>,
    /// Ghost blocks for every placement in `result`
    pub proposed: Vec<TimeBlock>,
    /// Load of committed plus proposed blocks
    pub burnout: BurnoutReport,
    /// Free windows left inside the search window after placement
    pub free: Vec<TimeGap>,
}

impl DayPlan {
    /// Committed and proposed blocks, sorted by start time.
    pub fn merged_blocks(&self) -> Vec<TimeBlock> {
        let mut merged: Vec<TimeBlock> = self
            .existing
            .iter()
            .chain(self.proposed.iter())
            .cloned()
            .collect();
        merged.sort_by_key(|b| b.start_time);
        merged
    }
}

/// Runs the schedule-then-evaluate flow against external sources.
#[derive(Debug, Clone)]
pub struct Planner {
    scheduler: AutoScheduler,
    limit_hours: f64,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(SchedulerConfig::default(), DEFAULT_LIMIT_HOURS)
    }
}

impl Planner {
    pub fn new(config: SchedulerConfig, limit_hours: f64) -> Self {
        Self {
            scheduler: AutoScheduler::with_config(config),
            limit_hours,
        }
    }

    /// Build from application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.scheduler_config(), config.burnout.limit_hours))
    }

    pub fn limit_hours(&self) -> f64 {
        self.limit_hours
    }

    /// Plan `date` for a user at `energy`, as seen from `now`.
    pub fn plan_day<Tz: TimeZone>(
        &self,
        tasks: &dyn TaskSource,
        blocks: &dyn TimeBlockSource,
        energy: EnergyLevel,
        date: NaiveDate,
        now: DateTime<Tz>,
    ) -> Result<DayPlan> {
        let (day_start, day_end) = day_bounds(date, &now.timezone())?;
        let window = SearchWindow::for_day(self.scheduler.config(), date, &now)?;

        let pending = tasks.pending_tasks()?;
        // The overflow window may reach past midnight in other timezones;
        // read the wider of the two ranges.
        let existing = blocks.blocks_between(day_start.min(window.start), day_end.max(window.end))?;

        let result = self
            .scheduler
            .schedule_at(&pending, &existing, energy, date, now)?;
        let proposed = result.ghost_blocks();

        let merged: Vec<&TimeBlock> = existing.iter().chain(proposed.iter()).collect();
        let burnout = check_burnout(&merged, self.limit_hours);
        let free = find_gaps(&merged, window.start, window.end, MIN_FREE_GAP_MINUTES);

        info!(
            %date,
            total_hours = burnout.total_hours,
            is_burnout = burnout.is_burnout,
            "day planned"
        );

        Ok(DayPlan {
            date,
            result,
            existing,
            proposed,
            burnout,
            free,
        })
    }
}
