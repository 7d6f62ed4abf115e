// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard rows and ranked API entries.

use serde::Serialize;
use sqlx::FromRow;

/// Individual standing as read from the database (already sorted).
#[derive(Debug, Clone, FromRow)]
pub struct IndividualStanding {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub minutes: i64,
}

/// Team standing as read from the database (already sorted).
#[derive(Debug, Clone, FromRow)]
pub struct TeamStanding {
    pub id: i64,
    pub name: String,
    pub minutes: i64,
}

/// One ranked leaderboard entry.
///
/// Team IDs are rendered as strings so both leaderboard variants share a
/// wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position in the sorted order
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl LeaderboardEntry {
    /// Assign ranks to individual standings by sort position.
    pub fn from_individuals(rows: Vec<IndividualStanding>) -> Vec<Self> {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| Self {
                rank: i as u32 + 1,
                id: row.id,
                name: row.name,
                minutes: row.minutes,
                avatar_url: row.avatar_url,
            })
            .collect()
    }

    /// Assign ranks to team standings by sort position.
    pub fn from_teams(rows: Vec<TeamStanding>) -> Vec<Self> {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| Self {
                rank: i as u32 + 1,
                id: row.id.to_string(),
                name: row.name,
                minutes: row.minutes,
                avatar_url: None,
            })
            .collect()
    }
}
