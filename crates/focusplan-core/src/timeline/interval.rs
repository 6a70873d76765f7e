//! Half-open interval helpers.
//!
//! Every interval is `[start, end)`: two intervals that only touch at an
//! endpoint do not overlap.

use chrono::{DateTime, Utc};

/// Anything with a start and an end on the timeline.
pub trait Interval {
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;

    /// Length in whole minutes
    fn duration_minutes(&self) -> i64 {
        (self.end() - self.start()).num_minutes()
    }

    /// Whether this interval overlaps `other`
    fn overlaps_with<I: Interval + ?Sized>(&self, other: &I) -> bool {
        overlaps(self.start(), self.end(), other.start(), other.end())
    }
}

impl Interval for (DateTime<Utc>, DateTime<Utc>) {
    fn start(&self) -> DateTime<Utc> {
        self.0
    }

    fn end(&self) -> DateTime<Utc> {
        self.1
    }
}

impl<T: Interval + ?Sized> Interval for &T {
    fn start(&self) -> DateTime<Utc> {
        (**self).start()
    }

    fn end(&self) -> DateTime<Utc> {
        (**self).end()
    }
}

/// `start1 < end2 && start2 < end1`
pub fn overlaps(
    start1: DateTime<Utc>,
    end1: DateTime<Utc>,
    start2: DateTime<Utc>,
    end2: DateTime<Utc>,
) -> bool {
    start1 < end2 && start2 < end1
}

/// Fractional hours covered by `interval`.
pub fn duration_hours<I: Interval + ?Sized>(interval: &I) -> f64 {
    (interval.end() - interval.start()).num_seconds() as f64 / 3600.0
}

/// Minutes covered by the union of `intervals`, counting overlaps once.
pub fn union_minutes<I: Interval>(intervals: &[I]) -> i64 {
    merge(intervals)
        .iter()
        .map(|(start, end)| (*end - *start).num_minutes())
        .sum()
}

/// Sort and coalesce intervals into disjoint spans. Empty or inverted
/// intervals are dropped.
pub(crate) fn merge<I: Interval>(intervals: &[I]) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut spans: Vec<_> = intervals
        .iter()
        .map(|i| (i.start(), i.end()))
        .filter(|(start, end)| start < end)
        .collect();
    spans.sort_by_key(|(start, _)| *start);

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
