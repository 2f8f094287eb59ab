// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity catalog and signup routes.

use crate::error::{AppError, Result};
use crate::services::ActivityCatalog;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Activity routes (public).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/{activity_name}/signup", post(signup))
        .route("/activities/{activity_name}/unregister", post(unregister))
}

#[derive(Deserialize)]
struct EmailQuery {
    /// Student email; no format validation beyond being present.
    email: Option<String>,
}

impl EmailQuery {
    fn require_email(self) -> Result<String> {
        self.email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))
    }
}

/// Confirmation body for a successful signup or withdrawal.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List every activity with its current participants.
async fn list_activities(State(state): State<Arc<AppState>>) -> Json<ActivityCatalog> {
    Json(state.roster.list_activities())
}

/// Sign a student up for an activity.
async fn signup(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(activity_name), _): WithRejection<Path<String>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQuery>, AppError>,
) -> Result<Json<MessageResponse>> {
    let email = query.require_email()?;

    let message = state
        .roster
        .enroll(&activity_name, &email)
        .inspect_err(|e| {
            tracing::warn!(activity = %activity_name, email = %email, error = %e, "Signup rejected")
        })?;

    Ok(Json(MessageResponse { message }))
}

/// Remove a student from an activity.
async fn unregister(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(activity_name), _): WithRejection<Path<String>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQuery>, AppError>,
) -> Result<Json<MessageResponse>> {
    let email = query.require_email()?;

    let message = state
        .roster
        .withdraw(&activity_name, &email)
        .inspect_err(|e| {
            tracing::warn!(activity = %activity_name, email = %email, error = %e, "Unregister rejected")
        })?;

    Ok(Json(MessageResponse { message }))
}
