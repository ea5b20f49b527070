//! Daily streak tracking.
//!
//! Calendar days are evaluated in the time zone of the `now` timestamp the
//! caller passes in. The "one day later" test measures the distance from the
//! start of today back to the previous completion and rounds it up to whole
//! days, so it can be off by one around DST changes.

use chrono::{DateTime, TimeZone, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// How a completion relates to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// No quiz was ever completed before
    FirstActivity,
    /// Another completion on the same calendar day
    SameDay,
    /// First completion on the day after the previous one
    NextDay,
    /// More than a day has passed
    Broken,
}

impl StreakTransition {
    /// Apply this transition to the current streak
    pub const fn apply(self, streak: u32) -> u32 {
        match self {
            Self::SameDay => streak,
            Self::NextDay => streak + 1,
            Self::FirstActivity | Self::Broken => 1,
        }
    }
}

/// Classify a completion at `now` against the previous completion `last`.
pub fn classify<Tz: TimeZone>(last: Option<DateTime<Utc>>, now: &DateTime<Tz>) -> StreakTransition {
    let Some(last) = last else {
        return StreakTransition::FirstActivity;
    };

    let today = now.date_naive();
    if last.with_timezone(&now.timezone()).date_naive() == today {
        return StreakTransition::SameDay;
    }

    if days_between(last, start_of_day(now)) == 1 {
        StreakTransition::NextDay
    } else {
        StreakTransition::Broken
    }
}

/// Absolute distance in whole days, rounded up
fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let diff_ms = (b - a).num_milliseconds().abs();
    (diff_ms + DAY_MS - 1) / DAY_MS
}

/// Midnight of `now`'s calendar day in its own time zone
fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(now.timezone()).earliest())
        .map_or_else(|| now.with_timezone(&Utc), |midnight| midnight.with_timezone(&Utc))
}
