// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

// Frame decoding
//
// Turns raw response bytes into classified data frames:
// - Stateful UTF-8 decoding, reassembling multi-byte characters split
//   across chunk boundaries
// - `data:` prefix recognition
// - `[DONE]` sentinel detection
// - Content extraction from the JSON envelope at choices[0].delta.content

/// Reserved payload marking authoritative end-of-stream.
pub const DONE_SENTINEL: &str = "[DONE]";

// ---------------------------------------------------------------------------
// Incremental UTF-8 decoding
// ---------------------------------------------------------------------------

/// Decodes a byte stream into text across arbitrary chunk boundaries.
///
/// An incomplete multi-byte sequence at the end of a chunk is held back and
/// prepended to the next chunk. An invalid sequence becomes U+FFFD and
/// decoding continues; the decoder never fails.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, carrying any incomplete tail over to the next call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(chunk);

        let mut out = String::with_capacity(buf.len());
        let mut rest: &[u8] = &buf;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    // The prefix up to valid_up_to is known-good UTF-8.
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        None => {
                            // Incomplete sequence at the tail: wait for the
                            // next chunk.
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        self.pending = rest.to_vec();
        out
    }
}

// ---------------------------------------------------------------------------
// Frame recognition
// ---------------------------------------------------------------------------

/// Classification of one complete `data:` line's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePayload {
    /// Incremental content extracted from the envelope.
    Content(String),
    /// The completion sentinel.
    Done,
    /// Malformed or content-free frame. Recovered locally, never surfaced.
    Skip,
}

/// Strip the `data` prefix from a candidate frame line.
///
/// Returns `None` for lines that are not data frames (empty lines, SSE
/// comments, `event:` lines); those are not errors, just not frames.
pub fn parse_data_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("data: ")
        .or_else(|| trimmed.strip_prefix("data:"))
}

/// Classify a data frame payload.
///
/// A payload equal to the sentinel is `Done`. Otherwise the payload is
/// parsed as a JSON envelope and the incremental content field is read from
/// `choices[0].delta.content`; absence at any level, a non-string value, an
/// empty string, or unparseable JSON all classify as `Skip`.
pub fn classify_payload(payload: &str) -> FramePayload {
    let payload = payload.trim();

    if payload == DONE_SENTINEL {
        return FramePayload::Done;
    }

    let envelope: serde_json::Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(_) => return FramePayload::Skip,
    };

    match extract_content(&envelope) {
        Some(content) => FramePayload::Content(content),
        None => FramePayload::Skip,
    }
}

/// Optional-path extraction of the incremental content field.
fn extract_content(envelope: &serde_json::Value) -> Option<String> {
    let content = envelope
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()?;

    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // UTF-8 decoding across chunk boundaries
    // -----------------------------------------------------------------------

    #[test]
    fn multi_byte_char_split_across_chunks_reassembled() {
        // U+00E9 LATIN SMALL LETTER E WITH ACUTE is 0xC3 0xA9.
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"caf\xC3"), "caf");
        assert_eq!(decoder.decode(b"\xA9 au lait"), "\u{e9} au lait");
    }

    #[test]
    fn four_byte_char_split_three_ways() {
        // U+1F600 GRINNING FACE is 0xF0 0x9F 0x98 0x80.
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"\xF0\x9F"), "");
        assert_eq!(decoder.decode(b"\x98"), "");
        assert_eq!(decoder.decode(b"\x80"), "\u{1F600}");
    }

    #[test]
    fn invalid_sequence_becomes_replacement_char() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"a\xFFb"), "a\u{FFFD}b");
    }

    #[test]
    fn ascii_passes_through_unchanged() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"data: [DONE]\n"), "data: [DONE]\n");
    }

    // -----------------------------------------------------------------------
    // Data line recognition
    // -----------------------------------------------------------------------

    #[test]
    fn data_prefix_with_and_without_space() {
        assert_eq!(parse_data_line("data: {\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(parse_data_line("data:{\"a\":1}"), Some("{\"a\":1}"));
    }

    #[test]
    fn non_data_lines_are_not_frames() {
        assert_eq!(parse_data_line(""), None);
        assert_eq!(parse_data_line(": keep-alive"), None);
        assert_eq!(parse_data_line("event: message"), None);
        assert_eq!(parse_data_line("{\"choices\":[]}"), None);
    }

    // -----------------------------------------------------------------------
    // Payload classification
    // -----------------------------------------------------------------------

    #[test]
    fn sentinel_classifies_as_done() {
        assert_eq!(classify_payload("[DONE]"), FramePayload::Done);
        assert_eq!(classify_payload(" [DONE] "), FramePayload::Done);
    }

    #[test]
    fn content_extracted_from_envelope() {
        let payload = r#"{"choices":[{"delta":{"content":"Hi"}}]}"#;
        assert_eq!(
            classify_payload(payload),
            FramePayload::Content("Hi".to_string())
        );
    }

    #[test]
    fn malformed_json_classifies_as_skip() {
        assert_eq!(classify_payload("{not json"), FramePayload::Skip);
    }

    #[test]
    fn absent_content_at_any_level_classifies_as_skip() {
        for payload in [
            r#"{}"#,
            r#"{"choices":[]}"#,
            r#"{"choices":[{}]}"#,
            r#"{"choices":[{"delta":{}}]}"#,
            r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
            r#"{"choices":[{"delta":{"content":null}}]}"#,
            r#"{"choices":[{"delta":{"content":42}}]}"#,
        ] {
            assert_eq!(classify_payload(payload), FramePayload::Skip, "{payload}");
        }
    }

    #[test]
    fn empty_content_classifies_as_skip() {
        let payload = r#"{"choices":[{"delta":{"content":""}}]}"#;
        assert_eq!(classify_payload(payload), FramePayload::Skip);
    }
}
