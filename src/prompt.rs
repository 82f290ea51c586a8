// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

// Prompt composition
//
// Responsibilities:
// - Style and Intensity axes as closed enums
// - Per-variant instruction text via exhaustive matches (a new variant
//   without an instruction fails to compile)
// - compose(): pure function combining input text, style instruction and
//   intensity instruction into a single instruction-laden prompt

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Tone axis of the rewrite. Each variant carries one fixed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Ceremonial,
    Demonstrative,
    Informative,
    Persuasive,
    Conversational,
    Impromptu,
    Humorous,
}

/// All styles, in presentation order.
pub const STYLES: [Style; 7] = [
    Style::Ceremonial,
    Style::Demonstrative,
    Style::Informative,
    Style::Persuasive,
    Style::Conversational,
    Style::Impromptu,
    Style::Humorous,
];

impl Style {
    /// The instruction text embedded in the `STYLE:` section of the prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Style::Ceremonial => {
                "Use formal, elevated language. Employ dignified phrasing and \
                 ceremonial tone. Structure sentences with gravitas. Use \
                 sophisticated vocabulary naturally. Create a sense of \
                 importance and occasion."
            }
            Style::Demonstrative => {
                "Write with clear, explanation-driven focus. Guide the reader \
                 step by step. Use concrete examples and logical progression. \
                 Make complex ideas accessible. Prioritize clarity and \
                 instruction."
            }
            Style::Informative => {
                "Adopt a neutral, knowledge-first approach. Present facts \
                 objectively. Use straightforward structure. Avoid bias or \
                 persuasion. Focus on delivering information efficiently and \
                 accurately."
            }
            Style::Persuasive => {
                "Write convincingly with directional intent. Use rhetorical \
                 techniques naturally. Build compelling arguments. Create \
                 momentum toward a conclusion. Balance logic with emotional \
                 appeal."
            }
            Style::Conversational => {
                "Write as if speaking naturally to a friend. Use relaxed, \
                 everyday language. Vary sentence rhythm naturally. Include \
                 casual connectors. Sound like a real person, not a formal \
                 document."
            }
            Style::Impromptu => {
                "Write with spontaneous, loose flow. Allow slight \
                 imperfections that feel human. Use informal structure. \
                 Capture the feeling of off-the-cuff thought. Avoid \
                 over-polishing."
            }
            Style::Humorous => {
                "Inject light wit and human warmth. Use natural humor that \
                 doesn't feel forced. Maintain the message while adding \
                 personality. Keep it clever but not overbearing. Let \
                 personality shine through."
            }
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Ceremonial => "ceremonial",
            Style::Demonstrative => "demonstrative",
            Style::Informative => "informative",
            Style::Persuasive => "persuasive",
            Style::Conversational => "conversational",
            Style::Impromptu => "impromptu",
            Style::Humorous => "humorous",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown style \"{0}\"")]
pub struct ParseStyleError(String);

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceremonial" => Ok(Style::Ceremonial),
            "demonstrative" => Ok(Style::Demonstrative),
            "informative" => Ok(Style::Informative),
            "persuasive" => Ok(Style::Persuasive),
            "conversational" => Ok(Style::Conversational),
            "impromptu" => Ok(Style::Impromptu),
            "humorous" => Ok(Style::Humorous),
            other => Err(ParseStyleError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Intensity
// ---------------------------------------------------------------------------

/// Degree axis of the rewrite: how far from the original the output may
/// stray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Light,
    Natural,
    Deep,
}

/// All intensities, in presentation order.
pub const INTENSITIES: [Intensity; 3] =
    [Intensity::Light, Intensity::Natural, Intensity::Deep];

impl Intensity {
    /// The instruction text embedded in the `INTENSITY:` section of the
    /// prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Intensity::Light => {
                "Apply minimal changes. Fix only obvious issues while \
                 preserving most of the original structure. Light touch."
            }
            Intensity::Natural => {
                "Rewrite naturally as a person would. Moderate transformation \
                 while maintaining the core message."
            }
            Intensity::Deep => {
                "Significantly restructure and reimagine the content. \
                 Transform it thoroughly while preserving meaning."
            }
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intensity::Light => "light",
            Intensity::Natural => "natural",
            Intensity::Deep => "deep",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown intensity \"{0}\"")]
pub struct ParseIntensityError(String);

impl FromStr for Intensity {
    type Err = ParseIntensityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Intensity::Light),
            "natural" => Ok(Intensity::Natural),
            "deep" => Ok(Intensity::Deep),
            other => Err(ParseIntensityError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Build the full rewriting prompt for one invocation.
///
/// The output embeds, in fixed order: a role-framing preamble, the invariant
/// rewriting rules, the style instruction, the intensity instruction, the
/// verbatim input, and a closing directive. Same arguments produce
/// byte-identical output.
pub fn compose(input: &str, style: Style, intensity: Intensity) -> String {
    format!(
        "You are a skilled human writer re-expressing text naturally.\n\
         \n\
         CRITICAL RULES:\n\
         - Reconstruct meaning, never just substitute synonyms\n\
         - Prefer restructuring over synonym-swapping\n\
         - Maintain natural human cadence with varied sentence rhythm\n\
         - Avoid robotic patterns or over-optimization\n\
         - Slight imperfection is allowed—humans aren't robotic\n\
         - Preserve emotional tone and intent\n\
         - Output ONLY the rephrased text, nothing else\n\
         \n\
         STYLE: {style_instruction}\n\
         \n\
         INTENSITY: {intensity_instruction}\n\
         \n\
         Original text:\n\
         {input}\n\
         \n\
         Rephrase the text naturally:",
        style_instruction = style.instruction(),
        intensity_instruction = intensity.instruction(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Test 1: every style x intensity combination carries both section
    //         markers and the untouched input
    // -----------------------------------------------------------------------

    #[test]
    fn all_combinations_carry_markers_and_input() {
        let input = "The quarterly numbers were disappointing.";

        for style in STYLES {
            for intensity in INTENSITIES {
                let prompt = compose(input, style, intensity);

                assert!(
                    prompt.contains("STYLE:"),
                    "missing STYLE marker for {style}/{intensity}"
                );
                assert!(
                    prompt.contains("INTENSITY:"),
                    "missing INTENSITY marker for {style}/{intensity}"
                );
                assert!(
                    prompt.contains(input),
                    "input not embedded verbatim for {style}/{intensity}"
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Test 2: composition is deterministic
    // -----------------------------------------------------------------------

    #[test]
    fn compose_is_deterministic() {
        let a = compose("hello", Style::Conversational, Intensity::Natural);
        let b = compose("hello", Style::Conversational, Intensity::Natural);
        assert_eq!(a, b);
    }

    // -----------------------------------------------------------------------
    // Test 3: the selected instructions appear in the prompt
    // -----------------------------------------------------------------------

    #[test]
    fn selected_instructions_are_embedded() {
        let prompt = compose("text", Style::Ceremonial, Intensity::Deep);

        assert!(prompt.contains(Style::Ceremonial.instruction()));
        assert!(prompt.contains(Intensity::Deep.instruction()));
        assert!(!prompt.contains(Style::Humorous.instruction()));
        assert!(!prompt.contains(Intensity::Light.instruction()));
    }

    // -----------------------------------------------------------------------
    // Test 4: instruction tables are injective (no two variants share text)
    // -----------------------------------------------------------------------

    #[test]
    fn style_instructions_are_distinct() {
        for (i, a) in STYLES.iter().enumerate() {
            for b in &STYLES[i + 1..] {
                assert_ne!(a.instruction(), b.instruction(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn intensity_instructions_are_distinct() {
        for (i, a) in INTENSITIES.iter().enumerate() {
            for b in &INTENSITIES[i + 1..] {
                assert_ne!(a.instruction(), b.instruction(), "{a} vs {b}");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Test 5: Display/FromStr round-trip (CLI parsing contract)
    // -----------------------------------------------------------------------

    #[test]
    fn style_display_from_str_round_trip() {
        for style in STYLES {
            let parsed: Style = style.to_string().parse().unwrap();
            assert_eq!(parsed, style);
        }
        assert!("shakespearean".parse::<Style>().is_err());
    }

    #[test]
    fn intensity_display_from_str_round_trip() {
        for intensity in INTENSITIES {
            let parsed: Intensity = intensity.to_string().parse().unwrap();
            assert_eq!(parsed, intensity);
        }
        assert!("extreme".parse::<Intensity>().is_err());
    }

    // -----------------------------------------------------------------------
    // Test 6: sections appear in the documented order
    // -----------------------------------------------------------------------

    #[test]
    fn prompt_sections_in_fixed_order() {
        let prompt = compose("the input", Style::Informative, Intensity::Light);

        let rules = prompt.find("CRITICAL RULES:").unwrap();
        let style = prompt.find("STYLE:").unwrap();
        let intensity = prompt.find("INTENSITY:").unwrap();
        let original = prompt.find("Original text:").unwrap();
        let closing = prompt.find("Rephrase the text naturally:").unwrap();

        assert!(rules < style);
        assert!(style < intensity);
        assert!(intensity < original);
        assert!(original < closing);
    }
}
