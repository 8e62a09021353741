// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text downloads of the plan and analysis results.

use crate::error::{AppError, Result};
use crate::models::AnalysisKind;
use crate::services::{format_for_export, CurrentSession};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

/// Filename offered for the plan download.
pub const PLAN_EXPORT_FILENAME: &str = "my_fitness_plan.txt";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/export/plan", get(export_plan))
        .route("/api/export/{kind}", get(export_analysis))
}

/// A `text/plain` attachment response.
fn text_attachment(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Download the plan narrative (without the macro block).
async fn export_plan(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Response> {
    let narrative = session
        .read(&state.sessions, |s| s.plan.as_ref().map(|p| p.narrative.clone()))
        .flatten()
        .ok_or_else(|| AppError::NotFound("No plan generated yet".to_string()))?;

    Ok(text_attachment(
        PLAN_EXPORT_FILENAME,
        format_for_export(&narrative),
    ))
}

/// Download a food or room analysis.
async fn export_analysis(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    Path(kind): Path<String>,
) -> Result<Response> {
    let kind: AnalysisKind = kind.parse().map_err(AppError::BadRequest)?;

    let text = session
        .read(&state.sessions, |s| s.analysis(kind).map(|r| r.text.clone()))
        .flatten()
        .ok_or_else(|| AppError::NotFound(format!("No {kind} analysis yet")))?;

    Ok(text_attachment(kind.export_filename(), format_for_export(&text)))
}
