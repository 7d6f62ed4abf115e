// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Walk30: a daily walking challenge tracker.
//!
//! This crate provides the backend API for logging walks, deriving per-user
//! stats (totals, streaks, averages), and ranking individuals and teams.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::{ActivityService, TeamService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub activities: ActivityService,
    pub teams: TeamService,
}

impl AppState {
    /// Wire up services around a database handle.
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            activities: ActivityService::new(db.clone()),
            teams: TeamService::new(db.clone()),
            config,
            db,
        }
    }
}
