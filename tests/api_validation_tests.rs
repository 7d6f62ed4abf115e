// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! All of these requests carry a valid session; they must be rejected at
//! the validation boundary with a 400 before any database work happens
//! (the mock database would turn a reached query into a 500).

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn post_json(uri: &str, body: serde_json::Value) -> StatusCode {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    response.status()
}

#[tokio::test]
async fn test_zero_minutes_rejected() {
    let status = post_json(
        "/api/activities",
        json!({"date": "2026-03-10T09:00:00Z", "minutes": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_minutes_above_daily_maximum_rejected() {
    let status = post_json(
        "/api/activities",
        json!({"date": "2026-03-10T09:00:00Z", "minutes": 1441}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unparseable_date_rejected() {
    let status = post_json(
        "/api/activities",
        json!({"date": "not-a-date", "minutes": 30}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_boundary_minutes_pass_validation() {
    // 1 and 1440 are valid, so these requests get past validation and die
    // on the offline database instead of returning a 400.
    for minutes in [1, 1440] {
        let status = post_json(
            "/api/activities",
            json!({"date": "2026-03-10T09:00:00Z", "minutes": minutes}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn test_short_team_name_rejected() {
    let status = post_json("/api/teams", json!({"name": "ab"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_long_team_name_rejected() {
    let status = post_json("/api/teams", json!({"name": "x".repeat(31)})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_join_code_rejected() {
    let status = post_json("/api/teams/join", json!({"code": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
