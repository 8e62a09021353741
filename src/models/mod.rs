// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod analysis;
pub mod plan;
pub mod profile;

pub use analysis::{AnalysisKind, AnalysisResult, ImageUpload};
pub use plan::{GeneratedPlan, MacroRatio};
pub use profile::{ActivityLevel, BudgetLevel, Goal, HealthProfile};
