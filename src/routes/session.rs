// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session inspection and teardown.

use crate::middleware::session::session_cookie;
use crate::models::HealthProfile;
use crate::services::{CurrentSession, SessionState};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/session", get(get_session).delete(end_session))
}

/// What the current session holds. A caller without a session gets an
/// empty summary.
#[derive(Serialize)]
pub struct SessionSummary {
    pub profile: Option<HealthProfile>,
    pub has_plan: bool,
    pub has_food_analysis: bool,
    pub has_room_analysis: bool,
}

impl From<&SessionState> for SessionSummary {
    fn from(s: &SessionState) -> Self {
        Self {
            profile: s.profile.clone(),
            has_plan: s.plan.is_some(),
            has_food_analysis: s.food.is_some(),
            has_room_analysis: s.room.is_some(),
        }
    }
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Json<SessionSummary> {
    let summary = session
        .read(&state.sessions, |s| SessionSummary::from(s))
        .unwrap_or_else(|| SessionSummary::from(&SessionState::default()));

    Json(summary)
}

/// End the session: discard its state and clear the cookie.
async fn end_session(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(id) = session.id() {
        state.sessions.remove(id);
        tracing::info!("Session ended by client");
    }

    let jar = jar.remove(session_cookie(String::new(), state.config.secure_cookies()));
    (jar, StatusCode::NO_CONTENT)
}
