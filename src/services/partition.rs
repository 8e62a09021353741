// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Splits a plan response into narrative text and the macro block.
//!
//! A response without the macro marker is a normal outcome. A response whose
//! macro block cannot be read falls back to showing the whole text, so a
//! formatting slip by the model never hides the plan.

use crate::macro_format::{MACRO_LABELS, MACRO_SECTION_MARKER, PERCENT_SIGN};
use crate::models::MacroRatio;

/// Narrative and optional macros extracted from a plan response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionedPlan {
    pub narrative: String,
    pub macros: Option<MacroRatio>,
}

impl PartitionedPlan {
    fn unparsed(response: &str) -> Self {
        Self {
            narrative: response.to_string(),
            macros: None,
        }
    }
}

/// Why a macro block could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacroSectionError {
    #[error("Macro section has no {0} label")]
    MissingLabel(&'static str),

    #[error("No '%' after the {0} label")]
    MissingPercent(&'static str),

    #[error("Value for {label} is not an integer: {value:?}")]
    InvalidValue { label: &'static str, value: String },
}

/// Split a plan response, reporting a malformed macro block as an error.
pub fn try_partition(response: &str) -> Result<PartitionedPlan, MacroSectionError> {
    let Some((narrative, section)) = response.split_once(MACRO_SECTION_MARKER) else {
        return Ok(PartitionedPlan::unparsed(response));
    };

    let macros = parse_macro_section(section)?;
    Ok(PartitionedPlan {
        narrative: narrative.to_string(),
        macros: Some(macros),
    })
}

/// Split a plan response, falling back to the full text when the macro block
/// is malformed.
pub fn partition(response: &str) -> PartitionedPlan {
    try_partition(response).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Malformed macro section, showing full response");
        PartitionedPlan::unparsed(response)
    })
}

/// Read `PROTEIN:`, `CARBS:` and `FATS:` in that order from a macro block.
///
/// Each label is searched for after the previous value's `%`. No range or
/// sum check is applied.
pub fn parse_macro_section(section: &str) -> Result<MacroRatio, MacroSectionError> {
    let mut values = [0i32; 3];
    let mut rest = section;

    for (slot, label) in values.iter_mut().zip(MACRO_LABELS) {
        let (value, remainder) = read_labelled_value(rest, label)?;
        *slot = value;
        rest = remainder;
    }

    let [protein, carbs, fats] = values;
    Ok(MacroRatio {
        protein,
        carbs,
        fats,
    })
}

/// Parse the integer between `label` and the next `%`, returning it with the
/// text that follows the `%`.
fn read_labelled_value<'a>(
    text: &'a str,
    label: &'static str,
) -> Result<(i32, &'a str), MacroSectionError> {
    let label_end = text
        .find(label)
        .map(|pos| pos + label.len())
        .ok_or(MacroSectionError::MissingLabel(label))?;

    let after_label = &text[label_end..];
    let percent = after_label
        .find(PERCENT_SIGN)
        .ok_or(MacroSectionError::MissingPercent(label))?;

    let raw = after_label[..percent].trim();
    let value = raw
        .parse::<i32>()
        .map_err(|_| MacroSectionError::InvalidValue {
            label,
            value: raw.to_string(),
        })?;

    Ok((value, &after_label[percent + PERCENT_SIGN.len_utf8()..]))
}
