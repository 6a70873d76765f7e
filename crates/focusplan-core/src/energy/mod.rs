//! Energy inference for tasks without an explicit level.
//!
//! A heuristic classifier: duration thresholds first, then title keywords.
//! An explicit level on the task always short-circuits the heuristic.

use crate::task::{EnergyLevel, Task};

/// Durations above this need high energy (minutes).
pub const HIGH_ENERGY_MINUTES: u32 = 80;
/// Durations above this need at least medium energy (minutes).
pub const MEDIUM_ENERGY_MINUTES: u32 = 40;

const HIGH_ENERGY_KEYWORDS: &[&str] = &["study", "research", "build"];
const LOW_ENERGY_KEYWORDS: &[&str] = &["meeting", "email"];

/// Infer the energy level a task requires.
///
/// Precedence: explicit `energy_level`, then duration, then title keywords,
/// then `Low`.
pub fn calculate_task_energy(task: &Task) -> EnergyLevel {
    if let Some(level) = task.energy_level {
        return level;
    }

    if task.duration_minutes > HIGH_ENERGY_MINUTES {
        return EnergyLevel::High;
    }
    if task.duration_minutes > MEDIUM_ENERGY_MINUTES {
        return EnergyLevel::Medium;
    }

    infer_from_title(&task.title).unwrap_or(EnergyLevel::Low)
}

fn infer_from_title(title: &str) -> Option<EnergyLevel> {
    let title = title.to_lowercase();
    if HIGH_ENERGY_KEYWORDS.iter().any(|kw| title.contains(kw)) {
        Some(EnergyLevel::High)
    } else if LOW_ENERGY_KEYWORDS.iter().any(|kw| title.contains(kw)) {
        Some(EnergyLevel::Low)
    } else {
        None
    }
}
