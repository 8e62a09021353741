// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan and photo analysis workflows.
//!
//! Each workflow is one request/response cycle:
//! 1. Compile the prompt from the profile
//! 2. Call the model gateway once (no retries)
//! 3. For plans, split out the macro block

use crate::error::Result;
use crate::models::{AnalysisKind, AnalysisResult, GeneratedPlan, HealthProfile, ImageUpload};
use crate::services::gemini::ModelGateway;
use crate::services::partition::partition;
use crate::services::prompt::{compile_analysis_prompt, compile_plan_prompt};
use crate::time_utils::now_utc_rfc3339;
use std::sync::Arc;

/// Runs prompts through the model gateway.
#[derive(Clone)]
pub struct Coach {
    gateway: Arc<dyn ModelGateway>,
}

impl Coach {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Generate a 7-day plan for `profile`.
    pub async fn generate_plan(&self, profile: &HealthProfile) -> Result<GeneratedPlan> {
        tracing::info!(
            goal = %profile.goal,
            exam_mode = profile.exam_mode,
            "Generating plan"
        );

        let prompt = compile_plan_prompt(profile);
        let response = self.gateway.generate_text(&prompt).await?;
        let parts = partition(&response);

        tracing::info!(
            narrative_len = parts.narrative.len(),
            has_macros = parts.macros.is_some(),
            "Plan generated"
        );

        Ok(GeneratedPlan {
            narrative: parts.narrative,
            macros: parts.macros,
            generated_at: now_utc_rfc3339(),
        })
    }

    /// Analyze a meal or workout-space photo, personalized when a profile exists.
    pub async fn analyze_photo(
        &self,
        kind: AnalysisKind,
        profile: Option<&HealthProfile>,
        image: ImageUpload,
    ) -> Result<AnalysisResult> {
        tracing::info!(
            kind = %kind,
            personalized = profile.is_some(),
            image_bytes = image.bytes.len(),
            "Analyzing photo"
        );

        let prompt = compile_analysis_prompt(kind, profile);
        let text = self.gateway.generate(&prompt, Some(&image)).await?;

        Ok(AnalysisResult {
            kind,
            image,
            text,
            generated_at: now_utc_rfc3339(),
        })
    }
}
