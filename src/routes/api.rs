// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, LeaderboardEntry, Team, TeamWithMembers, User, UserStats};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

/// Entries returned per leaderboard.
const LEADERBOARD_SIZE: i64 = 50;

/// API routes (require authentication via the session JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/activities", post(log_activity).get(list_activities))
        .route("/api/stats", get(get_stats))
        .route("/api/teams", post(create_team))
        .route("/api/teams/join", post(join_team))
        .route("/api/teams/me", get(my_team))
        .route("/api/leaderboard", get(get_leaderboard))
}

// ─── User Profile ────────────────────────────────────────────

/// Get (and on first sign-in, provision) the current user's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>> {
    let profile = state.db.ensure_user(&user.profile()).await?;
    Ok(Json(profile))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct LogActivityRequest {
    /// When the walk happened; RFC3339 timestamp or `YYYY-MM-DD`
    pub date: String,
    #[validate(range(min = 1, max = 1440, message = "minutes must be between 1 and 1440"))]
    pub minutes: i32,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Log a new walk. Returns the stored record.
async fn log_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LogActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    payload.validate().map_err(validation_error)?;
    let date = parse_activity_date(&payload.date)?;

    let activity = state
        .activities
        .log(&user.profile(), date, payload.minutes, payload.notes.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Items to return (default 10, capped at 100)
    limit: Option<u32>,
}

/// List the user's activities, newest first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state.activities.list(&user.user_id, params.limit).await?;
    Ok(Json(activities))
}

// ─── Stats ───────────────────────────────────────────────────

/// Dashboard stats for the current user.
///
/// The reference date for the streak is the current UTC day; the
/// computation itself never reads the clock.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserStats>> {
    let today: NaiveDate = Utc::now().date_naive();
    let stats = state.activities.stats(&user.user_id, today).await?;
    Ok(Json(stats))
}

// ─── Teams ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 3, max = 30, message = "Team name must be between 3 and 30 characters"))]
    pub name: String,
}

/// Create a team; the creator is auto-enrolled as the first member.
async fn create_team(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>)> {
    payload.validate().map_err(validation_error)?;

    let team = state.teams.create(&user.profile(), &payload.name).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct JoinTeamRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Join a team by code. 404 for an unknown code, 400 when already a member.
async fn join_team(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<JoinTeamRequest>,
) -> Result<Json<Team>> {
    payload.validate().map_err(validation_error)?;

    let team = state.teams.join(&user.profile(), &payload.code).await?;

    Ok(Json(team))
}

/// The current user's team with members, or null.
async fn my_team(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Option<TeamWithMembers>>> {
    let team = state.teams.my_team(&user.user_id).await?;
    Ok(Json(team))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum LeaderboardType {
    #[default]
    Individual,
    Team,
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    #[serde(rename = "type", default)]
    kind: LeaderboardType,
}

/// Ranked top-50 standings, individual (default) or team.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<AuthUser>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let entries = match params.kind {
        LeaderboardType::Individual => {
            let rows = state.db.individual_leaderboard(LEADERBOARD_SIZE).await?;
            LeaderboardEntry::from_individuals(rows)
        }
        LeaderboardType::Team => {
            let rows = state.db.team_leaderboard(LEADERBOARD_SIZE).await?;
            LeaderboardEntry::from_teams(rows)
        }
    };

    Ok(Json(entries))
}

// ─── Helpers ─────────────────────────────────────────────────

/// Parse an activity date: RFC3339 timestamp, or a bare `YYYY-MM-DD`
/// interpreted as midnight UTC.
///
/// Parsed here rather than by serde so a malformed date is a 400 with a
/// field message, not a body rejection.
fn parse_activity_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = day.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    Err(AppError::BadRequest(
        "date must be an RFC3339 timestamp or a YYYY-MM-DD date".to_string(),
    ))
}

/// Surface the first configured validation message as a 400.
fn validation_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, field_errors)| field_errors.iter())
        .filter_map(|err| err.message.clone())
        .map(|msg| msg.into_owned())
        .next()
        .unwrap_or_else(|| "Invalid request".to_string());

    AppError::BadRequest(message)
}
