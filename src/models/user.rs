//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User profile row.
///
/// Identity is owned by the external provider; this row is upserted from
/// verified session claims on the first authenticated operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Subject identifier from the identity provider
    pub id: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Profile picture URL
    pub profile_image_url: Option<String>,
    /// When the user first signed in
    pub created_at: DateTime<Utc>,
    /// Last profile refresh
    pub updated_at: DateTime<Utc>,
}

/// Profile fields carried by a verified session, used to upsert the user
/// row on first sign-in.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}
