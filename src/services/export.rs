// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of model output for download.

use std::borrow::Cow;

const BOLD_MARKER: &str = "**";
const EXPORT_HEADING_PREFIX: &str = "--- ";
const MAX_HEADING_LEVEL: usize = 6;
/// Replaced wherever it occurs, not only at line start.
const INLINE_HEADING_MARKER: &str = "### ";

/// Strip bold markers and turn Markdown headings into `--- `.
///
/// Any heading level followed by a space is converted at the start of a line.
/// `### ` is also converted mid-line, since models often inline it. Other
/// levels mid-line are left alone so text like `C# ` survives. Everything
/// else, including line endings and indentation, is copied through unchanged.
pub fn format_for_export(text: &str) -> String {
    let unbolded = text.replace(BOLD_MARKER, "");

    let mut out = String::with_capacity(unbolded.len());
    for line in unbolded.split_inclusive('\n') {
        out.push_str(&replace_heading_marker(line));
    }
    out.replace(INLINE_HEADING_MARKER, EXPORT_HEADING_PREFIX)
}

/// Rewrite `#`..`######` followed by a space at the start of a line.
fn replace_heading_marker(line: &str) -> Cow<'_, str> {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - body.len()];
    let level = body.len() - body.trim_start_matches('#').len();

    if (1..=MAX_HEADING_LEVEL).contains(&level) && body[level..].starts_with(' ') {
        Cow::Owned(format!(
            "{indent}{EXPORT_HEADING_PREFIX}{}",
            &body[level + 1..]
        ))
    } else {
        Cow::Borrowed(line)
    }
}
