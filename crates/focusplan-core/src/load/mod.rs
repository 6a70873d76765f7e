//! Daily load evaluation.
//!
//! Sums the hours covered by a list of blocks and flags overload against a
//! threshold. Blocks are summed as given: overlapping blocks count twice.
//! Use [`crate::timeline::union_minutes`] for an overlap-free total.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::timeline::{duration_hours, Interval};

/// Default daily limit before a day counts as overloaded (hours).
pub const DEFAULT_LIMIT_HOURS: f64 = 8.0;

/// Aggregate load for a set of blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BurnoutReport {
    pub is_burnout: bool,
    pub total_hours: f64,
}

/// Sum `blocks` in fractional hours and compare against `limit_hours`.
///
/// `is_burnout` holds only when the total strictly exceeds the limit.
pub fn check_burnout<I: Interval>(blocks: &[I], limit_hours: f64) -> BurnoutReport {
    let total_hours: f64 = blocks.iter().map(|b| duration_hours(b)).sum();
    let is_burnout = total_hours > limit_hours;

    if is_burnout {
        warn!(total_hours, limit_hours, "scheduled load exceeds daily limit");
    }

    BurnoutReport {
        is_burnout,
        total_hours,
    }
}
