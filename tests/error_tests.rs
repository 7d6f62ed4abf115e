// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error-to-response mapping tests.

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use walk30_tracker::error::AppError;

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_unauthorized_maps_to_401() {
    let (status, body) = body_json(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_invalid_token_maps_to_401() {
    let (status, _) = body_json(AppError::InvalidToken).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_not_found_maps_to_404_with_details() {
    let (status, body) = body_json(AppError::NotFound("Team not found".to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["details"], "Team not found");
}

#[tokio::test]
async fn test_bad_request_carries_message() {
    let (status, body) =
        body_json(AppError::BadRequest("minutes must be between 1 and 1440".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "minutes must be between 1 and 1440");
}

#[tokio::test]
async fn test_conflict_maps_to_400_with_explanation() {
    let (status, body) = body_json(AppError::Conflict("You are already in a team".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["details"], "You are already in a team");
}

#[tokio::test]
async fn test_database_error_is_generic_500() {
    let (status, body) =
        body_json(AppError::Database("connection refused on 10.0.0.3".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    // Internals must not leak to the client
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_internal_error_is_generic_500() {
    let (status, body) = body_json(AppError::Internal(anyhow::anyhow!("boom"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}
