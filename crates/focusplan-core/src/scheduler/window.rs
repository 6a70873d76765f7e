//! Search window for a scheduling run.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use super::SchedulerConfig;
use crate::error::ValidationError;

/// The `[start, end)` range the slot scan walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SearchWindow {
    /// Compute the window for `target_date` as seen from `now`.
    ///
    /// - today, at or after the work start: the next half-hour boundary
    ///   (`:30` when at most 30 minutes past the hour, else the next `:00`)
    /// - today before the work start, or any other day: the work start
    ///
    /// The end is always `work_end_hour + overflow_hours` on the target date.
    pub fn for_day<Tz: TimeZone>(
        config: &SchedulerConfig,
        target_date: NaiveDate,
        now: &DateTime<Tz>,
    ) -> Result<Self, ValidationError> {
        let tz = now.timezone();
        let local_now = now.naive_local();

        let start = if target_date == local_now.date() && local_now.hour() >= config.work_start_hour {
            next_half_hour(local_now)
        } else {
            at_hour(target_date, config.work_start_hour)?
        };
        let end = at_hour(target_date, config.work_end_hour + config.overflow_hours)?;

        Ok(Self {
            start: resolve(&tz, start)?,
            end: resolve(&tz, end)?,
        })
    }
}

/// Midnight-to-midnight bounds of `date` in `tz`, as UTC instants.
pub fn day_bounds<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    Ok((resolve(tz, at_hour(date, 0)?)?, resolve(tz, at_hour(date, 24)?)?))
}

fn next_half_hour(now: NaiveDateTime) -> NaiveDateTime {
    let past_hour = Duration::minutes(i64::from(now.minute()))
        + Duration::seconds(i64::from(now.second()))
        + Duration::nanoseconds(i64::from(now.nanosecond()));
    let hour_start = now - past_hour;

    if now.minute() > 30 {
        hour_start + Duration::hours(1)
    } else {
        hour_start + Duration::minutes(30)
    }
}

/// `hour` may be 24, meaning midnight at the end of `date`.
fn at_hour(date: NaiveDate, hour: u32) -> Result<NaiveDateTime, ValidationError> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        ValidationError::invalid_value("target_date", format!("{date} has no midnight"))
    })?;
    Ok(midnight + Duration::hours(i64::from(hour)))
}

fn resolve<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, ValidationError> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            ValidationError::invalid_value(
                "target_date",
                format!("{local} does not exist in the scheduling timezone"),
            )
        })
}
