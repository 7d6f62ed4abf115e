// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity workflows: logging walks, listing history, deriving stats.

use chrono::{DateTime, NaiveDate, Utc};

use crate::db::Database;
use crate::error::Result;
use crate::models::user::UserProfile;
use crate::models::{Activity, UserStats};

/// Default number of activities returned by a listing.
const DEFAULT_LIST_LIMIT: u32 = 10;
/// Cap on a single listing request.
const MAX_LIST_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct ActivityService {
    db: Database,
}

impl ActivityService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new walk for the session user.
    ///
    /// The row is immutable once stored. Input shape validation happens at
    /// the request boundary; the `minutes` CHECK constraint is the final
    /// guard.
    pub async fn log(
        &self,
        user: &UserProfile,
        date: DateTime<Utc>,
        minutes: i32,
        notes: Option<&str>,
    ) -> Result<Activity> {
        self.db.ensure_user(user).await?;

        let activity = self.db.insert_activity(&user.id, date, minutes, notes).await?;

        tracing::info!(
            user_id = %user.id,
            activity_id = activity.id,
            minutes,
            "Activity logged"
        );

        Ok(activity)
    }

    /// List the user's activities, newest first.
    pub async fn list(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<Activity>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        self.db.activities_for_user(user_id, i64::from(limit)).await
    }

    /// Derive dashboard stats from the user's full history.
    ///
    /// `today` is injected so the streak is testable against a fixed date.
    pub async fn stats(&self, user_id: &str, today: NaiveDate) -> Result<UserStats> {
        let log = self.db.activity_log(user_id).await?;
        Ok(UserStats::compute(&log, today))
    }
}
