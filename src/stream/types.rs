// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

// Stream types
//
// Events emitted to the caller and the knobs controlling token handling.

/// One observable step of a rephrase exchange.
///
/// A single invocation yields zero or more `Token` events followed by
/// exactly one terminal event (`Done` or `Failed`), after which the channel
/// closes. No `Token` is ever emitted after a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RephraseEvent {
    /// One incremental unit of rewritten text.
    Token(String),
    /// The stream completed, either via the `[DONE]` sentinel or by the
    /// transport ending cleanly.
    Done,
    /// The exchange failed; carries the single user-facing message.
    Failed(String),
}

impl RephraseEvent {
    /// Whether this event ends the exchange.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RephraseEvent::Done | RephraseEvent::Failed(_))
    }
}

/// How extracted tokens are treated before emission.
///
/// `PerToken` runs each token through the sanitizer and drops tokens that
/// sanitize to empty. Because sanitization sees one token at a time, the
/// preamble and edge-quote passes only reliably fire on the first token of
/// a stream. That is the accepted cost of not buffering: assembling the
/// full text before cleaning would defeat streaming latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeMode {
    PerToken,
    Off,
}
