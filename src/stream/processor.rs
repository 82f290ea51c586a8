// Stream processor
//
// Owns the read loop of one rephrase exchange. Consumes the raw byte
// stream, drives the frame decoder, optionally sanitizes tokens, and emits
// `RephraseEvent`s over a channel.
//
// Terminal contract: every exit path of the spawned task sends exactly one
// of `Done`/`Failed`, and nothing after it. The `[DONE]` sentinel is an
// authoritative early exit; bytes already read but not yet processed are
// discarded. A stream that ends without the sentinel completes via the
// fallback path.

use super::decoder::{classify_payload, parse_data_line, FramePayload, Utf8Decoder};
use super::sanitizer::sanitize;
use super::types::{RephraseEvent, SanitizeMode};
use bytes::Bytes;
use std::fmt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};

/// Processes the response byte stream of one exchange into rephrase events.
pub struct StreamProcessor {
    sanitize: SanitizeMode,
}

impl StreamProcessor {
    pub fn new(sanitize: SanitizeMode) -> Self {
        Self { sanitize }
    }

    /// Consume a byte stream, producing an event stream.
    ///
    /// A transport error mid-stream terminates the exchange with a single
    /// `Failed` event carrying the error's display text.
    pub fn process<E>(
        &self,
        mut input: impl Stream<Item = Result<Bytes, E>> + Unpin + Send + 'static,
    ) -> ReceiverStream<RephraseEvent>
    where
        E: fmt::Display + Send + 'static,
    {
        let sanitize = self.sanitize;
        let (tx, rx) = mpsc::channel::<RephraseEvent>(64);

        tokio::spawn(async move {
            let mut state = ParseState::new();

            while let Some(item) = input.next().await {
                let chunk = match item {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.send(RephraseEvent::Failed(e.to_string())).await;
                        return;
                    }
                };

                let decoded = state.decoder.decode(&chunk);
                state.line_buffer.push_str(&decoded);

                if drain_lines(&mut state, sanitize, &tx).await.is_err() {
                    return;
                }
            }

            // Fallback completion: the transport ended without the sentinel.
            // The unterminated tail of the buffer, if any, is discarded.
            let _ = tx.send(RephraseEvent::Done).await;
        });

        ReceiverStream::new(rx)
    }
}

// ---------------------------------------------------------------------------
// Processing state
// ---------------------------------------------------------------------------

/// Mutable state carried through one read loop.
struct ParseState {
    /// UTF-8 decoder holding the undecoded byte tail.
    decoder: Utf8Decoder,
    /// Decoded text after the last newline, waiting for the rest of the line.
    line_buffer: String,
}

impl ParseState {
    fn new() -> Self {
        Self {
            decoder: Utf8Decoder::new(),
            line_buffer: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Line processing
// ---------------------------------------------------------------------------

/// Drain all complete lines from the buffer and process each one.
///
/// `Err(())` means the read loop must stop: either a terminal event was
/// sent (sentinel observed) or the receiver is gone.
async fn drain_lines(
    state: &mut ParseState,
    sanitize_mode: SanitizeMode,
    tx: &mpsc::Sender<RephraseEvent>,
) -> Result<(), ()> {
    while let Some(newline_pos) = state.line_buffer.find('\n') {
        let line = state.line_buffer[..newline_pos].to_string();
        state.line_buffer = state.line_buffer[newline_pos + 1..].to_string();

        let Some(payload) = parse_data_line(&line) else {
            continue;
        };

        match classify_payload(payload) {
            FramePayload::Done => {
                let _ = tx.send(RephraseEvent::Done).await;
                return Err(());
            }
            FramePayload::Content(content) => {
                let token = match sanitize_mode {
                    SanitizeMode::PerToken => {
                        let cleaned = sanitize(&content);
                        if cleaned.is_empty() {
                            continue;
                        }
                        cleaned
                    }
                    SanitizeMode::Off => content,
                };
                if tx.send(RephraseEvent::Token(token)).await.is_err() {
                    // Receiver dropped; nobody is listening anymore.
                    return Err(());
                }
            }
            FramePayload::Skip => {}
        }
    }
    Ok(())
}
