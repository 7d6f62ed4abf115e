// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team workflows: creation with join-code generation, joining by code,
//! and the current user's team view.

use rand::Rng;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::user::UserProfile;
use crate::models::{Team, TeamWithMembers};

/// Join codes avoid characters that read ambiguously when shared aloud or
/// scrawled on a whiteboard (I/l/1, O/0).
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 6;

/// Regeneration attempts before giving up on a unique join code.
const MAX_CODE_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct TeamService {
    db: Database,
}

impl TeamService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a team and auto-enroll the creator as its first member.
    ///
    /// The join code is regenerated when it collides with an existing
    /// team's code (unique-constraint violation), rather than assuming
    /// random strings never collide.
    pub async fn create(&self, creator: &UserProfile, name: &str) -> Result<Team> {
        self.db.ensure_user(creator).await?;

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_join_code();
            if let Some(team) = self
                .db
                .create_team_with_creator(name, &code, &creator.id)
                .await?
            {
                tracing::info!(team_id = team.id, code = %team.code, "Team created");
                return Ok(team);
            }
            tracing::debug!(code = %code, "Join code collision, regenerating");
        }

        Err(AppError::Internal(anyhow::anyhow!(
            "could not generate a unique join code after {} attempts",
            MAX_CODE_ATTEMPTS
        )))
    }

    /// Join a team by its code.
    ///
    /// Fails with not-found for an unknown code, and with a conflict if the
    /// user already belongs to a team (enforced by the membership unique
    /// constraint, so concurrent joins cannot both win).
    pub async fn join(&self, user: &UserProfile, code: &str) -> Result<Team> {
        self.db.ensure_user(user).await?;

        let code = code.trim().to_uppercase();
        let team = self
            .db
            .team_by_code(&code)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

        self.db.join_team(team.id, &user.id).await?;

        tracing::info!(team_id = team.id, user_id = %user.id, "User joined team");

        Ok(team)
    }

    /// The user's team with its member roster, or None.
    pub async fn my_team(&self, user_id: &str) -> Result<Option<TeamWithMembers>> {
        let Some(team) = self.db.team_for_user(user_id).await? else {
            return Ok(None);
        };

        let members = self.db.team_members(team.id).await?;
        let member_count = members.len();

        Ok(Some(TeamWithMembers {
            team,
            members,
            member_count,
        }))
    }
}

/// Generate a short human-enterable join code.
fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}
