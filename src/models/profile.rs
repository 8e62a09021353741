// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health profile submitted through the plan form.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Longest free-text answer accepted for any profile field.
pub const MAX_FREE_TEXT_LEN: u64 = 2000;

/// Fitness objective selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Goal {
    WeightLoss,
    WeightGain,
    MuscleGain,
    Strength,
    Endurance,
    GeneralFitness,
    FatLoss,
    StressRelief,
    ImproveEnergy,
    PostureImprovement,
}

impl Goal {
    pub const ALL: [Goal; 10] = [
        Goal::WeightLoss,
        Goal::WeightGain,
        Goal::MuscleGain,
        Goal::Strength,
        Goal::Endurance,
        Goal::GeneralFitness,
        Goal::FatLoss,
        Goal::StressRelief,
        Goal::ImproveEnergy,
        Goal::PostureImprovement,
    ];

    /// Human-readable label, as shown on the form and in prompts.
    pub fn label(self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::WeightGain => "Weight Gain",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Strength => "Strength",
            Goal::Endurance => "Endurance",
            Goal::GeneralFitness => "General Fitness",
            Goal::FatLoss => "Fat Loss",
            Goal::StressRelief => "Stress Relief",
            Goal::ImproveEnergy => "Improve Energy",
            Goal::PostureImprovement => "Posture Improvement",
        }
    }
}

/// Daily food budget, ordered from cheapest to most generous.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BudgetLevel {
    Tight,
    Moderate,
    High,
}

impl BudgetLevel {
    pub const ALL: [BudgetLevel; 3] = [BudgetLevel::Tight, BudgetLevel::Moderate, BudgetLevel::High];

    pub fn label(self) -> &'static str {
        match self {
            BudgetLevel::Tight => "Hostel/Tight",
            BudgetLevel::Moderate => "Moderate",
            BudgetLevel::High => "High",
        }
    }
}

/// Current activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::VeryActive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(Goal, BudgetLevel, ActivityLevel);

/// Snapshot of the user's answers for one plan submission.
///
/// Never edited after it is compiled into a prompt; a new submission replaces
/// the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthProfile {
    pub goal: Goal,
    pub budget_level: BudgetLevel,
    /// e.g. "Asthma, Knee pain"
    #[serde(default)]
    #[validate(length(max = MAX_FREE_TEXT_LEN))]
    pub medical_conditions: String,
    /// e.g. "Vegan, Halal, No Nuts"
    #[serde(default)]
    #[validate(length(max = MAX_FREE_TEXT_LEN))]
    pub dietary_restrictions: String,
    pub activity_level: ActivityLevel,
    /// e.g. "Gym, Walking/Jogging, Yoga"
    #[serde(default)]
    #[validate(length(max = MAX_FREE_TEXT_LEN))]
    pub activity_detail: String,
    /// e.g. "Mediterranean, South Indian"
    #[serde(default)]
    #[validate(length(max = MAX_FREE_TEXT_LEN))]
    pub cultural_style: String,
    #[serde(default)]
    pub exam_mode: bool,
    #[serde(default)]
    #[validate(length(max = MAX_FREE_TEXT_LEN))]
    pub additional_notes: String,
}
