// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team and membership models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::User;

/// A named group of users sharing a join code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Generated team ID
    pub id: i64,
    /// Display name (3..=30 chars)
    pub name: String,
    /// Unique human-enterable join code, shared out-of-band
    pub code: String,
    /// User who created the team
    pub creator_id: String,
    /// When the team was created
    pub created_at: DateTime<Utc>,
}

/// Join record linking one user to one team.
///
/// A user belongs to at most one team; the `team_members.user_id` unique
/// constraint enforces this at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    pub id: i64,
    pub team_id: i64,
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
}

/// Team with its member roster, as returned by `GET /api/teams/me`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<User>,
    pub member_count: usize,
}
