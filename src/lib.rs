// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mergington Activities: extracurricular signups for Mergington High School
//!
//! This crate provides the backend API that lists the school's activities
//! and lets students sign up for or unregister from them by email.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::ActivityRoster;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub roster: ActivityRoster,
}
