// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Postgres client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile upserts from session claims)
//! - Activities (immutable walk records)
//! - Teams and memberships
//! - Leaderboard aggregates

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::user::UserProfile;
use crate::models::{Activity, IndividualStanding, Team, TeamMembership, TeamStanding, User};

/// Unique constraint names from the migrations, used to tell a join-code
/// collision apart from a duplicate membership.
const TEAM_CODE_CONSTRAINT: &str = "teams_code_key";
const MEMBER_USER_CONSTRAINT: &str = "team_members_user_id_key";

/// Postgres database client.
#[derive(Clone)]
pub struct Database {
    pool: Option<PgPool>,
}

impl Database {
    /// Connect to Postgres and run pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Postgres: {}", e)))?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;

        tracing::info!("Connected to Postgres");

        Ok(Self { pool: Some(pool) })
    }

    /// Create a mock database client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { pool: None }
    }

    /// Helper to get the pool or return an error if offline.
    fn pool(&self) -> Result<&PgPool, AppError> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their identity-provider subject ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, profile_image_url,
                   created_at, updated_at
              FROM users
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert the user row on first sign-in, or refresh the profile fields
    /// the session actually carries.
    pub async fn ensure_user(&self, profile: &UserProfile) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
               SET email             = COALESCE(EXCLUDED.email, users.email),
                   first_name        = COALESCE(EXCLUDED.first_name, users.first_name),
                   last_name         = COALESCE(EXCLUDED.last_name, users.last_name),
                   profile_image_url = COALESCE(EXCLUDED.profile_image_url, users.profile_image_url),
                   updated_at        = now()
            RETURNING id, email, first_name, last_name, profile_image_url,
                      created_at, updated_at
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.profile_image_url)
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Store a new immutable activity record.
    pub async fn insert_activity(
        &self,
        user_id: &str,
        date: DateTime<Utc>,
        minutes: i32,
        notes: Option<&str>,
    ) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (user_id, date, minutes, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, date, minutes, notes, created_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(minutes)
        .bind(notes)
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's activities, newest first.
    pub async fn activities_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Activity>, AppError> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, user_id, date, minutes, notes, created_at
              FROM activities
             WHERE user_id = $1
             ORDER BY date DESC, id DESC
             LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Full `(timestamp, minutes)` log for stats computation.
    pub async fn activity_log(&self, user_id: &str) -> Result<Vec<(DateTime<Utc>, i32)>, AppError> {
        sqlx::query_as::<_, (DateTime<Utc>, i32)>(
            "SELECT date, minutes FROM activities WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Team Operations ─────────────────────────────────────────

    /// Insert a team and enroll its creator in one transaction.
    ///
    /// Returns `Ok(None)` when the join code collided with an existing team
    /// so the caller can regenerate and retry. A creator who already belongs
    /// to a team gets a conflict.
    pub async fn create_team_with_creator(
        &self,
        name: &str,
        code: &str,
        creator_id: &str,
    ) -> Result<Option<Team>, AppError> {
        let mut tx = self
            .pool()?
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let team = match sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, code, creator_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, code, creator_id, created_at
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await
        {
            Ok(team) => team,
            Err(e) if unique_violation(&e) == Some(TEAM_CODE_CONSTRAINT) => return Ok(None),
            Err(e) => return Err(AppError::Database(e.to_string())),
        };

        if let Err(e) = sqlx::query("INSERT INTO team_members (team_id, user_id) VALUES ($1, $2)")
            .bind(team.id)
            .bind(creator_id)
            .execute(&mut *tx)
            .await
        {
            if unique_violation(&e) == Some(MEMBER_USER_CONSTRAINT) {
                return Err(AppError::Conflict("You are already in a team".to_string()));
            }
            return Err(AppError::Database(e.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(Some(team))
    }

    /// Look up a team by its join code.
    pub async fn team_by_code(&self, code: &str) -> Result<Option<Team>, AppError> {
        sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, code, creator_id, created_at
              FROM teams
             WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Enroll a user in a team.
    ///
    /// The `team_members.user_id` unique constraint makes this safe against
    /// concurrent joins; the second insert loses and gets the conflict.
    pub async fn join_team(&self, team_id: i64, user_id: &str) -> Result<TeamMembership, AppError> {
        sqlx::query_as::<_, TeamMembership>(
            r#"
            INSERT INTO team_members (team_id, user_id)
            VALUES ($1, $2)
            RETURNING id, team_id, user_id, joined_at
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(self.pool()?)
        .await
        .map_err(|e| {
            if unique_violation(&e) == Some(MEMBER_USER_CONSTRAINT) {
                AppError::Conflict("You are already in a team".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// The team a user belongs to, if any.
    pub async fn team_for_user(&self, user_id: &str) -> Result<Option<Team>, AppError> {
        sqlx::query_as::<_, Team>(
            r#"
            SELECT t.id, t.name, t.code, t.creator_id, t.created_at
              FROM team_members m
              JOIN teams t ON t.id = m.team_id
             WHERE m.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All members of a team, in join order.
    pub async fn team_members(&self, team_id: i64) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.first_name, u.last_name,
                   u.profile_image_url, u.created_at, u.updated_at
              FROM team_members m
              JOIN users u ON u.id = m.user_id
             WHERE m.team_id = $1
             ORDER BY m.joined_at
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Leaderboards ────────────────────────────────────────────

    /// Individual standings: summed minutes per user, descending.
    ///
    /// LEFT JOIN keeps zero-activity users on the board at 0 minutes.
    /// Ties break on ascending user id so ranks are deterministic.
    pub async fn individual_leaderboard(
        &self,
        limit: i64,
    ) -> Result<Vec<IndividualStanding>, AppError> {
        sqlx::query_as::<_, IndividualStanding>(
            r#"
            SELECT u.id,
                   COALESCE(u.first_name || ' ' || u.last_name, u.email, u.id) AS name,
                   u.profile_image_url AS avatar_url,
                   COALESCE(SUM(a.minutes), 0)::BIGINT AS minutes
              FROM users u
              LEFT JOIN activities a ON a.user_id = u.id
             GROUP BY u.id
             ORDER BY minutes DESC, u.id
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Team standings: summed minutes across member activities, descending.
    ///
    /// INNER JOINs exclude teams whose members have logged nothing. Ties
    /// break on ascending team id.
    pub async fn team_leaderboard(&self, limit: i64) -> Result<Vec<TeamStanding>, AppError> {
        sqlx::query_as::<_, TeamStanding>(
            r#"
            SELECT t.id,
                   t.name,
                   SUM(a.minutes)::BIGINT AS minutes
              FROM teams t
              JOIN team_members m ON m.team_id = t.id
              JOIN activities a ON a.user_id = m.user_id
             GROUP BY t.id
             ORDER BY minutes DESC, t.id
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool()?)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Name of the violated unique constraint, if the error is one.
fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => db.constraint(),
        _ => None,
    }
}
