// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generated plan and its macronutrient split.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Daily macronutrient target as whole-number percentages.
///
/// Values are taken verbatim from the model and are not required to sum
/// to 100 or to stay within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroRatio {
    pub protein: i32,
    pub carbs: i32,
    pub fats: i32,
}

impl MacroRatio {
    /// Chart rows in display order.
    pub fn chart_rows(&self) -> [(&'static str, i32); 3] {
        [
            ("Protein", self.protein),
            ("Carbs", self.carbs),
            ("Fats", self.fats),
        ]
    }
}

/// A plan response split into readable text and the optional macro block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeneratedPlan {
    /// Markdown shown to the user
    pub narrative: String,
    pub macros: Option<MacroRatio>,
    /// When the model produced this plan (RFC3339)
    pub generated_at: String,
}
