// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

// Token sanitization
//
// Cosmetic cleanup of generated text:
// - strip a known boilerplate preamble at the very start
// - strip one leading and one trailing smart/straight quote
// - collapse runs of three or more newlines to exactly two
// - trim surrounding whitespace

use regex::Regex;
use std::sync::LazyLock;

static PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(Here['’]s the rephrased text:|Rephrased:|Here is the rewritten version:)\s*",
    )
    .expect("preamble pattern is valid")
});

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

const EDGE_QUOTES: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

/// Clean cosmetic artifacts from generated text.
///
/// Applying the function twice yields the same result as applying it once.
pub fn sanitize(text: &str) -> String {
    let without_preamble = PREAMBLE.replace(text, "");

    let mut text: &str = &without_preamble;
    text = text.strip_prefix(EDGE_QUOTES).unwrap_or(text);
    text = text.strip_suffix(EDGE_QUOTES).unwrap_or(text);

    let text = EXCESS_NEWLINES.replace_all(text, "\n\n");

    text.trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
