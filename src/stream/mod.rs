// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

// Streaming pipeline
//
// Responsibilities:
// - Decode chat-completion response streams into discrete content tokens
// - Reassemble multi-byte characters and frames split across chunks
// - Recognize the [DONE] sentinel as authoritative end-of-stream
// - Recover silently from malformed or content-free frames
// - Emit events over a channel with an exactly-once terminal signal

mod decoder;
mod processor;
mod sanitizer;
mod types;

pub use decoder::{classify_payload, parse_data_line, FramePayload, Utf8Decoder, DONE_SENTINEL};
pub use processor::StreamProcessor;
pub use sanitizer::sanitize;
pub use types::{RephraseEvent, SanitizeMode};
