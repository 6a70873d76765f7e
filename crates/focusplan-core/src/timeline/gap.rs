//! Free time detection between occupied blocks.
//!
//! Finds windows between existing blocks that remain available after a
//! plan is laid out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interval::{merge, Interval};

/// Size category of a time gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSize {
    Small,  // under 30 minutes
    Medium, // 30-59 minutes
    Large,  // 60+ minutes
}

impl GapSize {
    /// Categorize a gap by its duration in minutes
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes < 30 {
            Self::Small
        } else if minutes < 60 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// A free window on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGap {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub size: GapSize,
}

impl TimeGap {
    fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            size: GapSize::from_minutes((end_time - start_time).num_minutes()),
        }
    }
}

impl Interval for TimeGap {
    fn start(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end(&self) -> DateTime<Utc> {
        self.end_time
    }
}

/// Find gaps of at least `min_minutes` inside `[window_start, window_end)`.
///
/// Overlapping blocks are coalesced first, so the result is sorted and
/// disjoint.
pub fn find_gaps<I: Interval>(
    blocks: &[I],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_minutes: i64,
) -> Vec<TimeGap> {
    let mut gaps = Vec::new();
    let mut cursor = window_start;

    let mut push_gap = |from: DateTime<Utc>, to: DateTime<Utc>| {
        if (to - from).num_minutes() >= min_minutes.max(1) {
            gaps.push(TimeGap::new(from, to));
        }
    };

    for (start, end) in merge(blocks) {
        if end <= cursor {
            continue;
        }
        if start >= window_end {
            break;
        }
        if start > cursor {
            push_gap(cursor, start);
        }
        cursor = end.min(window_end);
    }

    if cursor < window_end {
        push_gap(cursor, window_end);
    }

    gaps
}
