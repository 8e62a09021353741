// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The macronutrient block format shared by the plan prompt and the parser.
//!
//! The model is asked to end every plan with this block and the partitioner
//! reads it back, so both sides must be built from these constants.

/// Header line that separates the narrative from the macro block.
pub const MACRO_SECTION_MARKER: &str = "MACRONUTRIENT RATIO";

pub const PROTEIN_LABEL: &str = "PROTEIN:";
pub const CARBS_LABEL: &str = "CARBS:";
pub const FATS_LABEL: &str = "FATS:";

/// Labels in the order they must appear inside the macro block.
pub const MACRO_LABELS: [&str; 3] = [PROTEIN_LABEL, CARBS_LABEL, FATS_LABEL];

/// Terminator that follows each value.
pub const PERCENT_SIGN: char = '%';

/// Instruction appended to the plan prompt describing the exact block layout.
pub fn macro_format_instruction() -> String {
    let lines: Vec<String> = MACRO_LABELS
        .iter()
        .map(|label| format!("{label} [number]{PERCENT_SIGN}"))
        .collect();

    format!(
        "Finally, provide a '{MACRO_SECTION_MARKER}' section in exactly this format:\n{}",
        lines.join("\n")
    )
}
