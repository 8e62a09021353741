// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal and workout-space photo analysis routes.

use crate::error::{AppError, Result};
use crate::models::analysis::ACCEPTED_IMAGE_TYPES;
use crate::models::{AnalysisKind, AnalysisResult, ImageUpload};
use crate::services::{CurrentSession, SessionId};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/analysis/{kind}", get(get_analysis).post(analyze))
        .route("/api/analysis/{kind}/image", get(get_analysis_image))
}

/// Photo upload body.
#[derive(Deserialize)]
pub struct AnalysisRequest {
    /// `image/jpeg` or `image/png`
    pub mime_type: String,
    /// Base64 image data, optionally as a `data:` URL
    pub image_base64: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AnalysisResponse {
    pub kind: AnalysisKind,
    /// Markdown returned by the model
    pub result: String,
    pub image_mime_type: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub image_bytes: usize,
    pub generated_at: String,
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            kind: result.kind,
            result: result.text,
            image_mime_type: result.image.mime_type,
            image_bytes: result.image.bytes.len(),
            generated_at: result.generated_at,
        }
    }
}

fn parse_kind(raw: &str) -> Result<AnalysisKind> {
    raw.parse().map_err(AppError::BadRequest)
}

/// Normalize the declared type, accepting the common `image/jpg` alias.
fn normalize_mime_type(raw: &str) -> Result<String> {
    let mime = raw.trim().to_ascii_lowercase();
    let mime = if mime == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        mime
    };

    if ACCEPTED_IMAGE_TYPES.contains(&mime.as_str()) {
        Ok(mime)
    } else {
        Err(AppError::BadRequest(format!(
            "Unsupported image type '{raw}': expected JPEG or PNG"
        )))
    }
}

/// Decode and size-check an uploaded photo.
pub fn decode_image(request: &AnalysisRequest, max_bytes: usize) -> Result<ImageUpload> {
    let mime_type = normalize_mime_type(&request.mime_type)?;

    let data = request.image_base64.trim();
    let data = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    if data.is_empty() {
        return Err(AppError::BadRequest("Image data is empty".to_string()));
    }

    // Reject before decoding when the encoded length already exceeds the limit
    if data.len() / 4 * 3 > max_bytes + 2 {
        return Err(image_too_large(max_bytes));
    }

    let bytes = STANDARD
        .decode(data)
        .map_err(|_| AppError::BadRequest("Image data is not valid base64".to_string()))?;

    if bytes.len() > max_bytes {
        return Err(image_too_large(max_bytes));
    }

    Ok(ImageUpload { mime_type, bytes })
}

fn image_too_large(max_bytes: usize) -> AppError {
    AppError::BadRequest(format!("Image exceeds the {max_bytes} byte limit"))
}

/// Analyze a photo on the given track. A failure leaves the track's previous
/// result, the plan, and the other track untouched.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    Path(kind): Path<String>,
    Json(request): Json<AnalysisRequest>,
) -> Result<(Extension<SessionId>, Json<AnalysisResponse>)> {
    let kind = parse_kind(&kind)?;
    let image = decode_image(&request, state.config.max_image_bytes)?;
    let coach = state.coach()?;

    let profile = session
        .read(&state.sessions, |s| s.profile.clone())
        .flatten();

    let result = coach.analyze_photo(kind, profile.as_ref(), image).await?;

    let (id, ()) = state
        .sessions
        .update_or_create(session.id(), |s| s.record_analysis(result.clone()))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((Extension(id), Json(result.into())))
}

fn current_result(
    state: &AppState,
    session: &CurrentSession,
    kind: AnalysisKind,
) -> Result<AnalysisResult> {
    session
        .read(&state.sessions, |s| s.analysis(kind).cloned())
        .flatten()
        .ok_or_else(|| AppError::NotFound(format!("No {kind} analysis yet")))
}

/// The session's latest result on a track.
async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    Path(kind): Path<String>,
) -> Result<Json<AnalysisResponse>> {
    let kind = parse_kind(&kind)?;
    let result = current_result(&state, &session, kind)?;
    Ok(Json(result.into()))
}

/// The photo that produced the latest result on a track.
async fn get_analysis_image(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let image = current_result(&state, &session, kind)?.image;
    Ok(([(header::CONTENT_TYPE, image.mime_type)], image.bytes))
}
