//! Automatic scheduler for pending tasks.
//!
//! This module places tasks into free slots on a target day:
//! - Filters tasks the user has no energy for (kept aside as `excluded`)
//! - Splits over-long tasks into bounded fragments
//! - Orders fragments high-energy first, then shortest first
//! - Greedily assigns each fragment the first free 15-minute-aligned slot,
//!   restarting the scan from the window start for every fragment
//!
//! Placement is first-fit, not optimal. The exact ordering and restart
//! behavior are part of the contract: the same inputs always yield the same
//! placements.

mod window;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{Result, ValidationError};
use crate::task::{split_task, EnergyLevel, SplitPolicy, Task};
use crate::timeline::{overlaps, Interval, TimeBlock};

pub use window::{day_bounds, SearchWindow};

/// A task (or fragment) placed on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task: Task,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval for ScheduledTask {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Output of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Placements in the order they were accepted
    pub scheduled: Vec<ScheduledTask>,
    /// Eligible tasks or fragments that found no slot
    pub unscheduled: Vec<Task>,
    /// Tasks skipped because they demand more energy than the user has
    #[serde(default)]
    pub excluded: Vec<Task>,
}

impl ScheduleResult {
    /// Proposed placements as ghost blocks, ready to be shown next to the
    /// committed calendar.
    pub fn ghost_blocks(&self) -> Vec<TimeBlock> {
        self.scheduled
            .iter()
            .map(|s| {
                let mut block = TimeBlock::new(uuid::Uuid::new_v4().to_string(), s.start, s.end)
                    .with_task_ref(s.task.title.clone(), s.task.effective_energy());
                block.is_ghost = true;
                block
            })
            .collect()
    }

    /// Total minutes placed in this run
    pub fn scheduled_minutes(&self) -> i64 {
        self.scheduled.iter().map(|s| s.duration_minutes()).sum()
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Nominal start of the working day (hour, local time)
    pub work_start_hour: u32,
    /// Nominal end of the working day (hour, local time)
    pub work_end_hour: u32,
    /// Extra hours past `work_end_hour` the search may spill into
    pub overflow_hours: u32,
    /// Granularity of the slot scan (minutes)
    pub slot_step_minutes: u32,
    /// Tasks longer than this are split (minutes)
    pub max_chunk_minutes: u32,
    /// Fragment size when splitting (minutes)
    pub split_chunk_minutes: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            work_start_hour: 9,
            work_end_hour: 17,
            overflow_hours: 4,
            slot_step_minutes: 15,
            max_chunk_minutes: 90,
            split_chunk_minutes: 60,
        }
    }
}

impl SchedulerConfig {
    /// Check the working window and chunk sizes are coherent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.work_start_hour >= self.work_end_hour {
            return Err(ValidationError::invalid_value(
                "work_start_hour",
                format!(
                    "must be before work_end_hour ({} >= {})",
                    self.work_start_hour, self.work_end_hour
                ),
            ));
        }
        let search_end = self.work_end_hour.checked_add(self.overflow_hours);
        if search_end.map_or(true, |hour| hour > 24) {
            return Err(ValidationError::invalid_value(
                "overflow_hours",
                format!(
                    "work_end_hour + overflow_hours must not pass midnight ({} + {})",
                    self.work_end_hour, self.overflow_hours
                ),
            ));
        }
        if self.slot_step_minutes == 0 {
            return Err(ValidationError::invalid_value("slot_step_minutes", "must be positive"));
        }
        if self.split_chunk_minutes == 0 {
            return Err(ValidationError::invalid_value("split_chunk_minutes", "must be positive"));
        }
        if self.split_chunk_minutes > self.max_chunk_minutes {
            return Err(ValidationError::invalid_value(
                "split_chunk_minutes",
                "must not exceed max_chunk_minutes",
            ));
        }
        Ok(())
    }

    pub fn split_policy(&self) -> SplitPolicy {
        SplitPolicy {
            max_chunk_minutes: self.max_chunk_minutes,
            chunk_minutes: self.split_chunk_minutes,
        }
    }
}

/// Automatic scheduler for pending tasks
#[derive(Debug, Clone, Default)]
pub struct AutoScheduler {
    config: SchedulerConfig,
}

impl AutoScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedule `tasks` into `target_date`, using the local wall clock to
    /// decide whether the day has already started.
    pub fn schedule(
        &self,
        tasks: &[Task],
        existing_blocks: &[TimeBlock],
        user_energy: EnergyLevel,
        target_date: NaiveDate,
    ) -> Result<ScheduleResult> {
        self.schedule_at(tasks, existing_blocks, user_energy, target_date, Local::now())
    }

    /// Schedule against an explicit clock. Working hours are read in
    /// `now`'s timezone.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incoherent config, an existing
    /// block with `end_time <= start_time`, or an incomplete task with a
    /// zero duration.
    pub fn schedule_at<Tz: TimeZone>(
        &self,
        tasks: &[Task],
        existing_blocks: &[TimeBlock],
        user_energy: EnergyLevel,
        target_date: NaiveDate,
        now: DateTime<Tz>,
    ) -> Result<ScheduleResult> {
        self.config.validate()?;
        for block in existing_blocks {
            block.validate()?;
        }

        let mut result = ScheduleResult::default();

        // 1. Eligibility
        let mut candidates = Vec::new();
        for task in tasks.iter().filter(|t| !t.completed) {
            task.validate()?;
            let energy = task.effective_energy();
            if energy.fits_within(user_energy) {
                candidates.push((task, energy));
            } else {
                trace!(task_id = %task.id, %energy, %user_energy, "excluded: above user energy");
                result.excluded.push(task.clone());
            }
        }

        // 2. Decomposition
        let policy = self.config.split_policy();
        let mut fragments = Vec::new();
        for (task, energy) in candidates {
            if task.duration_minutes > policy.max_chunk_minutes {
                // Fragments keep the parent's level instead of re-inferring it.
                fragments.extend(split_task(task, policy).into_iter().map(|part| Task {
                    energy_level: Some(energy),
                    ..part
                }));
            } else {
                fragments.push(task.clone());
            }
        }

        // 3. Ordering
        sort_fragments(&mut fragments);

        // 4. Search window
        let window = SearchWindow::for_day(&self.config, target_date, &now)?;
        debug!(
            start = %window.start,
            end = %window.end,
            fragments = fragments.len(),
            "searching for slots"
        );

        // 5-6. Greedy placement
        for fragment in fragments {
            match self.find_slot(&fragment, &window, existing_blocks, &result.scheduled) {
                Some((start, end)) => {
                    debug!(task_id = %fragment.id, %start, %end, "placed");
                    result.scheduled.push(ScheduledTask {
                        task: fragment,
                        start,
                        end,
                    });
                }
                None => {
                    debug!(task_id = %fragment.id, minutes = fragment.duration_minutes, "no slot found");
                    result.unscheduled.push(fragment);
                }
            }
        }

        info!(
            scheduled = result.scheduled.len(),
            unscheduled = result.unscheduled.len(),
            excluded = result.excluded.len(),
            date = %target_date,
            "schedule computed"
        );

        Ok(result)
    }

    /// First slot of the fragment's exact length, scanning from the window
    /// start, that clashes with neither committed blocks nor earlier
    /// placements from this run.
    fn find_slot(
        &self,
        fragment: &Task,
        window: &SearchWindow,
        existing_blocks: &[TimeBlock],
        scheduled: &[ScheduledTask],
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let length = Duration::minutes(i64::from(fragment.duration_minutes));
        let step = Duration::minutes(i64::from(self.config.slot_step_minutes));

        let mut slot_start = window.start;
        while slot_start + length <= window.end {
            let slot_end = slot_start + length;
            let clashes = existing_blocks
                .iter()
                .any(|b| overlaps(slot_start, slot_end, b.start_time, b.end_time))
                || scheduled
                    .iter()
                    .any(|s| overlaps(slot_start, slot_end, s.start, s.end));

            if !clashes {
                return Some((slot_start, slot_end));
            }
            slot_start = slot_start + step;
        }
        None
    }
}

/// Energy rank descending, then duration ascending. Stable, so equal
/// fragments keep their input order.
fn sort_fragments(fragments: &mut [Task]) {
    fragments.sort_by(|a, b| {
        b.effective_energy()
            .rank()
            .cmp(&a.effective_energy().rank())
            .then(a.duration_minutes.cmp(&b.duration_minutes))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    /// A clock set to the previous day, so `day()` is in the future.
    fn before_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    fn task(id: &str, minutes: u32, energy: EnergyLevel) -> Task {
        Task::new(id, format!("Task {id}"), minutes).with_energy(energy)
    }

    fn run(tasks: &[Task], blocks: &[TimeBlock], energy: EnergyLevel) -> ScheduleResult {
        AutoScheduler::new()
            .schedule_at(tasks, blocks, energy, day(), before_day())
            .unwrap()
    }

    #[test]
    fn test_single_task_on_future_day_starts_at_work_start() {
        let result = run(&[task("a", 30, EnergyLevel::Low)], &[], EnergyLevel::Medium);

        assert_eq!(result.scheduled.len(), 1);
        assert_eq!(result.scheduled[0].start, at(9, 0));
        assert_eq!(result.scheduled[0].end, at(9, 30));
        assert!(result.unscheduled.is_empty());
    }

    #[test]
    fn test_high_energy_task_goes_first() {
        let tasks = vec![task("low", 30, EnergyLevel::Low), task("high", 60, EnergyLevel::High)];
        let result = run(&tasks, &[], EnergyLevel::High);

        assert_eq!(result.scheduled[0].task.id, "high");
        assert_eq!(result.scheduled[0].start, at(9, 0));
        assert_eq!(result.scheduled[1].task.id, "low");
        assert_eq!(result.scheduled[1].start, at(10, 0));
    }

    #[test]
    fn test_shorter_task_breaks_energy_ties() {
        let tasks = vec![task("long", 60, EnergyLevel::Medium), task("short", 15, EnergyLevel::Medium)];
        let result = run(&tasks, &[], EnergyLevel::Medium);
        assert_eq!(result.scheduled[0].task.id, "short");
        assert_eq!(result.scheduled[1].start, at(9, 15));
    }

    #[test]
    fn test_task_above_user_energy_is_excluded() {
        let result = run(&[task("hard", 30, EnergyLevel::High)], &[], EnergyLevel::Low);

        assert!(result.scheduled.is_empty());
        assert!(result.unscheduled.is_empty());
        assert_eq!(result.excluded.len(), 1);
        assert_eq!(result.excluded[0].id, "hard");
    }

    #[test]
    fn test_completed_tasks_are_dropped_silently() {
        let done = task("done", 0, EnergyLevel::Low).completed();
        let result = run(&[done], &[], EnergyLevel::High);
        assert_eq!(result, ScheduleResult::default());
    }

    #[test]
    fn test_overflow_hours_take_spillover() {
        let blocks = vec![TimeBlock::new("day", at(9, 0), at(17, 0))];
        let result = run(&[task("a", 30, EnergyLevel::Low)], &blocks, EnergyLevel::Low);
        assert_eq!(result.scheduled[0].start, at(17, 0));
    }

    #[test]
    fn test_fully_blocked_window_leaves_task_unscheduled() {
        let blocks = vec![
            TimeBlock::new("day", at(9, 0), at(17, 0)),
            TimeBlock::new("evening", at(17, 0), at(21, 0)),
        ];
        let result = run(&[task("a", 30, EnergyLevel::Low)], &blocks, EnergyLevel::Low);
        assert!(result.scheduled.is_empty());
        assert_eq!(result.unscheduled.len(), 1);
    }

    #[test]
    fn test_later_tasks_fill_earlier_gaps() {
        let blocks = vec![TimeBlock::new("standup", at(9, 30), at(10, 0))];
        let tasks = vec![task("focus", 60, EnergyLevel::Medium), task("email", 30, EnergyLevel::Low)];
        let result = run(&tasks, &blocks, EnergyLevel::High);

        assert_eq!(result.scheduled[0].task.id, "focus");
        assert_eq!(result.scheduled[0].start, at(10, 0));
        assert_eq!(result.scheduled[1].task.id, "email");
        assert_eq!(result.scheduled[1].start, at(9, 0));
    }

    #[test]
    fn test_slots_are_aligned_to_step() {
        let blocks = vec![TimeBlock::new("odd", at(9, 0), at(9, 10))];
        let result = run(&[task("a", 20, EnergyLevel::Low)], &blocks, EnergyLevel::Low);
        assert_eq!(result.scheduled[0].start, at(9, 15));
    }

    #[test]
    fn test_long_task_is_split_and_fully_placed() {
        let result = run(&[task("big", 150, EnergyLevel::High)], &[], EnergyLevel::High);

        assert_eq!(result.scheduled.len(), 3);
        // Shortest fragment first, then the hour-long parts back to back.
        assert_eq!(result.scheduled[0].task.id, "big-part3");
        assert_eq!(result.scheduled[0].start, at(9, 0));
        assert_eq!(result.scheduled[1].task.id, "big-part1");
        assert_eq!(result.scheduled[1].start, at(9, 30));
        assert_eq!(result.scheduled[2].end, at(11, 30));
        assert_eq!(result.scheduled_minutes(), 150);
    }

    #[test]
    fn test_task_longer_than_window_is_unscheduled() {
        let config = SchedulerConfig {
            max_chunk_minutes: 24 * 60,
            split_chunk_minutes: 60,
            ..SchedulerConfig::default()
        };
        let result = AutoScheduler::with_config(config)
            .schedule_at(&[task("marathon", 13 * 60, EnergyLevel::Low)], &[], EnergyLevel::Low, day(), before_day())
            .unwrap();
        assert_eq!(result.unscheduled.len(), 1);
    }

    #[test]
    fn test_inferred_energy_is_pinned_on_fragments() {
        // 150 minutes infers High; a bare 60-minute part would infer Medium.
        let long = Task::new("t", "Long thing", 150);
        let result = run(&[long], &[], EnergyLevel::High);
        assert!(result
            .scheduled
            .iter()
            .all(|s| s.task.energy_level == Some(EnergyLevel::High)));

        let excluded = run(&[Task::new("t", "Long thing", 150)], &[], EnergyLevel::Medium);
        assert_eq!(excluded.excluded.len(), 1);
        assert!(excluded.scheduled.is_empty());
    }

    #[test]
    fn test_unsplit_task_comes_back_unmodified() {
        let short = Task::new("s", "Tidy desk", 30);
        let result = run(&[short.clone()], &[], EnergyLevel::High);
        assert_eq!(result.scheduled[0].task, short);
        assert_eq!(result.scheduled[0].task.energy_level, None);

        let blocks = vec![TimeBlock::new("all", at(0, 0), at(23, 0))];
        let result = run(&[short.clone()], &blocks, EnergyLevel::High);
        assert_eq!(result.unscheduled, vec![short]);
    }

    #[test]
    fn test_today_after_start_anchors_to_next_half_hour() {
        let scheduler = AutoScheduler::new();
        let tasks = [task("a", 30, EnergyLevel::Low)];

        let now = Utc.with_ymd_and_hms(2026, 3, 2, 10, 10, 0).unwrap();
        let result = scheduler.schedule_at(&tasks, &[], EnergyLevel::Low, day(), now).unwrap();
        assert_eq!(result.scheduled[0].start, at(10, 30));

        let now = Utc.with_ymd_and_hms(2026, 3, 2, 10, 45, 0).unwrap();
        let result = scheduler.schedule_at(&tasks, &[], EnergyLevel::Low, day(), now).unwrap();
        assert_eq!(result.scheduled[0].start, at(11, 0));
    }

    #[test]
    fn test_today_before_start_anchors_to_work_start() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 6, 40, 0).unwrap();
        let result = AutoScheduler::new()
            .schedule_at(&[task("a", 30, EnergyLevel::Low)], &[], EnergyLevel::Low, day(), now)
            .unwrap();
        assert_eq!(result.scheduled[0].start, at(9, 0));
    }

    #[test]
    fn test_today_past_overflow_schedules_nothing() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 22, 0, 0).unwrap();
        let result = AutoScheduler::new()
            .schedule_at(&[task("a", 15, EnergyLevel::Low)], &[], EnergyLevel::Low, day(), now)
            .unwrap();
        assert!(result.scheduled.is_empty());
        assert_eq!(result.unscheduled.len(), 1);
    }

    #[test]
    fn test_working_hours_follow_clock_timezone() {
        let tokyo = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let now = tokyo.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let result = AutoScheduler::new()
            .schedule_at(&[task("a", 30, EnergyLevel::Low)], &[], EnergyLevel::Low, day(), now)
            .unwrap();
        // 09:00 in UTC+9 is 00:00 UTC on the same date.
        assert_eq!(result.scheduled[0].start, at(0, 0));
        assert_eq!(result.scheduled[0].start.with_timezone(&tokyo).day(), 2);
    }

    #[test]
    fn test_invalid_block_is_rejected() {
        let blocks = vec![TimeBlock::new("bad", at(11, 0), at(10, 0))];
        let err = AutoScheduler::new()
            .schedule_at(&[task("a", 30, EnergyLevel::Low)], &blocks, EnergyLevel::Low, day(), before_day())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Validation(ValidationError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn test_zero_duration_task_is_rejected() {
        let result = AutoScheduler::new().schedule_at(
            &[task("a", 0, EnergyLevel::Low)],
            &[],
            EnergyLevel::Low,
            day(),
            before_day(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(SchedulerConfig::default().validate().is_ok());

        let inverted = SchedulerConfig {
            work_start_hour: 17,
            work_end_hour: 9,
            ..SchedulerConfig::default()
        };
        assert!(inverted.validate().is_err());

        let past_midnight = SchedulerConfig {
            work_end_hour: 22,
            ..SchedulerConfig::default()
        };
        assert!(past_midnight.validate().is_err());

        let zero_step = SchedulerConfig {
            slot_step_minutes: 0,
            ..SchedulerConfig::default()
        };
        assert!(zero_step.validate().is_err());

        let wrapping = SchedulerConfig {
            overflow_hours: u32::MAX,
            ..SchedulerConfig::default()
        };
        assert!(wrapping.validate().is_err());
    }

    #[test]
    fn test_ghost_blocks_mirror_placements() {
        let result = run(&[task("a", 30, EnergyLevel::Low)], &[], EnergyLevel::Low);
        let ghosts = result.ghost_blocks();

        assert_eq!(ghosts.len(), 1);
        assert!(ghosts[0].is_ghost);
        assert_eq!(ghosts[0].start_time, at(9, 0));
        assert_eq!(ghosts[0].task_ref.as_ref().unwrap().title, "Task a");
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let tasks = vec![Task::new("t", "Long thing", 150)];
        let blocks = vec![TimeBlock::new("b", at(9, 0), at(10, 0))];
        let (tasks_before, blocks_before) = (tasks.clone(), blocks.clone());
        let _ = run(&tasks, &blocks, EnergyLevel::High);
        assert_eq!(tasks, tasks_before);
        assert_eq!(blocks, blocks_before);
    }

    fn energy_strategy() -> impl Strategy<Value = EnergyLevel> {
        prop_oneof![
            Just(EnergyLevel::Low),
            Just(EnergyLevel::Medium),
            Just(EnergyLevel::High),
        ]
    }

    prop_compose! {
        fn arb_task()(id in 0u32..1000, minutes in 1u32..200, energy in energy_strategy()) -> Task {
            Task::new(format!("t{id}"), "generated", minutes).with_energy(energy)
        }
    }

    prop_compose! {
        fn arb_block()(start in 0i64..(24 * 60), len in 1i64..240) -> TimeBlock {
            let base = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
            let start = base + Duration::minutes(start);
            TimeBlock::new("b", start, start + Duration::minutes(len))
        }
    }

    proptest! {
        #[test]
        fn placements_never_double_book(
            tasks in prop::collection::vec(arb_task(), 0..12),
            blocks in prop::collection::vec(arb_block(), 0..6),
            energy in energy_strategy(),
        ) {
            let result = run(&tasks, &blocks, energy);

            for (i, a) in result.scheduled.iter().enumerate() {
                for b in &blocks {
                    prop_assert!(!a.overlaps_with(b));
                }
                for b in &result.scheduled[i + 1..] {
                    prop_assert!(!a.overlaps_with(b));
                }
            }
        }

        #[test]
        fn placements_respect_energy(
            tasks in prop::collection::vec(arb_task(), 0..12),
            energy in energy_strategy(),
        ) {
            let result = run(&tasks, &[], energy);

            for s in &result.scheduled {
                prop_assert!(s.task.effective_energy().fits_within(energy));
            }
            for t in &result.unscheduled {
                prop_assert!(t.effective_energy().fits_within(energy));
            }
            for t in &result.excluded {
                prop_assert!(!t.effective_energy().fits_within(energy));
            }

            let placed: i64 = result.scheduled_minutes()
                + result.unscheduled.iter().map(|t| i64::from(t.duration_minutes)).sum::<i64>();
            let eligible: i64 = tasks
                .iter()
                .filter(|t| t.effective_energy().fits_within(energy))
                .map(|t| i64::from(t.duration_minutes))
                .sum();
            prop_assert_eq!(placed, eligible);
        }
    }
}
