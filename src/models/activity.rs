// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Walking activity model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A logged walking session. Immutable once created: there is no edit or
/// delete path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Generated record ID
    pub id: i64,
    /// Owning user ID
    pub user_id: String,
    /// When the walk happened
    pub date: DateTime<Utc>,
    /// Duration in minutes (1..=1440)
    pub minutes: i32,
    /// Optional free-text note
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}
