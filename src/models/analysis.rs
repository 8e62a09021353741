// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Photo analysis tracks (meal and workout space).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Which photo analysis produced a result. The two tracks never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum AnalysisKind {
    /// Meal photo nutrition breakdown
    Food,
    /// Room or gym photo workout circuit
    Room,
}

impl AnalysisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::Food => "food",
            AnalysisKind::Room => "room",
        }
    }

    /// Filename offered when the result is downloaded.
    pub fn export_filename(self) -> &'static str {
        match self {
            AnalysisKind::Food => "meal_analysis.txt",
            AnalysisKind::Room => "room_workout.txt",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(AnalysisKind::Food),
            "room" => Ok(AnalysisKind::Room),
            other => Err(format!("Unknown analysis kind: {other}")),
        }
    }
}

/// Image formats accepted by the uploaders.
pub const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// A decoded photo ready to be sent to the model.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Model output for one photo, kept alongside the photo that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub kind: AnalysisKind,
    pub image: ImageUpload,
    /// Markdown returned by the model
    pub text: String,
    pub generated_at: String,
}
