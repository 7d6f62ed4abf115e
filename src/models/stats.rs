//! Per-user statistics derived from the activity history.
//!
//! Everything here is computed on demand from the raw `(timestamp, minutes)`
//! rows; no aggregate is stored. Calendar days are truncated in UTC.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Derived statistics for a user's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Sum of minutes across all activities
    pub total_minutes: i64,
    /// Consecutive calendar days with at least one activity, ending today
    /// or yesterday
    pub current_streak: u32,
    /// Distinct calendar days with at least one activity
    pub days_active: u32,
    /// Minutes per active day, rounded half-up; 0 with no active days
    pub daily_average: i64,
}

impl UserStats {
    /// Compute stats from a user's activity log in a single pass.
    ///
    /// `today` is the reference date for the streak; callers pass the
    /// current UTC date, tests pass a fixed one.
    pub fn compute(entries: &[(DateTime<Utc>, i32)], today: NaiveDate) -> Self {
        let mut total_minutes: i64 = 0;
        let mut days: BTreeSet<NaiveDate> = BTreeSet::new();

        for (timestamp, minutes) in entries {
            total_minutes += i64::from(*minutes);
            days.insert(timestamp.date_naive());
        }

        let days_active = days.len() as u32;
        let daily_average = if days_active == 0 {
            0
        } else {
            (total_minutes as f64 / f64::from(days_active)).round() as i64
        };

        Self {
            total_minutes,
            current_streak: streak(&days, today),
            days_active,
            daily_average,
        }
    }
}

/// Length of the unbroken run of consecutive days ending today or yesterday.
///
/// Walks the distinct days from most recent backwards; a run whose most
/// recent day is older than yesterday is already broken.
fn streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today - Duration::days(1);

    let mut count = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for &day in days.iter().rev() {
        match previous {
            None => {
                if day < yesterday {
                    return 0;
                }
                count = 1;
            }
            Some(prev) => {
                if prev - day == Duration::days(1) {
                    count += 1;
                } else {
                    return count;
                }
            }
        }
        previous = Some(day);
    }

    count
}
