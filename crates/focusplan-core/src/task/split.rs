//! Decomposition of over-long tasks into bounded fragments.
//!
//! A task longer than the split threshold becomes a sequence of fixed-size
//! fragments, the last one carrying the remainder. Fragment ids stay
//! traceable to the parent (`{id}-part{N}`).

use super::Task;

/// Thresholds controlling when and how a task is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Tasks longer than this are split (minutes)
    pub max_chunk_minutes: u32,
    /// Size of each fragment (minutes)
    pub chunk_minutes: u32,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            max_chunk_minutes: 90,
            chunk_minutes: 60,
        }
    }
}

/// Split `task` into fragments according to `policy`.
///
/// Returns the task unchanged (as a single element) when its duration does
/// not exceed `policy.max_chunk_minutes`. Fragment durations always sum to
/// the original duration.
pub fn split_task(task: &Task, policy: SplitPolicy) -> Vec<Task> {
    if task.duration_minutes <= policy.max_chunk_minutes || policy.chunk_minutes == 0 {
        return vec![task.clone()];
    }

    let mut parts = Vec::new();
    let mut remaining = task.duration_minutes;
    let mut part = 1;

    while remaining > 0 {
        let chunk = remaining.min(policy.chunk_minutes);
        parts.push(Task {
            id: format!("{}-part{}", task.id, part),
            title: format!("{} (Part {})", task.title, part),
            duration_minutes: chunk,
            ..task.clone()
        });
        remaining -= chunk;
        part += 1;
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::EnergyLevel;
    use proptest::prelude::*;

    #[test]
    fn short_task_is_not_split() {
        let task = Task::new("t1", "Email triage", 90).with_energy(EnergyLevel::Low);
        let parts = split_task(&task, SplitPolicy::default());
        assert_eq!(parts, vec![task]);
    }

    #[test]
    fn long_task_splits_into_hour_parts_with_remainder() {
        let task = Task::new("t1", "Thesis", 150).with_energy(EnergyLevel::High);
        let parts = split_task(&task, SplitPolicy::default());

        let durations: Vec<u32> = parts.iter().map(|p| p.duration_minutes).collect();
        assert_eq!(durations, vec![60, 60, 30]);
        assert_eq!(parts[0].id, "t1-part1");
        assert_eq!(parts[2].id, "t1-part3");
        assert_eq!(parts[1].title, "Thesis (Part 2)");
        assert!(parts.iter().all(|p| p.energy_level == Some(EnergyLevel::High)));
        assert!(parts.iter().all(|p| p.created_at == task.created_at));
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let task = Task::new("t1", "Build", 120);
        let parts = split_task(&task, SplitPolicy::default());
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.duration_minutes == 60));
    }

    #[test]
    fn just_over_threshold_splits() {
        let task = Task::new("t1", "Review", 91);
        let durations: Vec<u32> = split_task(&task, SplitPolicy::default())
            .iter()
            .map(|p| p.duration_minutes)
            .collect();
        assert_eq!(durations, vec![60, 31]);
    }

    proptest! {
        #[test]
        fn fragments_preserve_total_duration(duration in 1u32..1000) {
            let task = Task::new("p", "Prop", duration);
            let parts = split_task(&task, SplitPolicy::default());
            let total: u32 = parts.iter().map(|p| p.duration_minutes).sum();
            prop_assert_eq!(total, duration);

            if duration <= 90 {
                prop_assert_eq!(parts.len(), 1);
                prop_assert_eq!(&parts[0], &task);
            } else {
                prop_assert!(parts.iter().all(|p| p.duration_minutes <= 60 && p.duration_minutes > 0));
            }
        }
    }
}
