// Request orchestration -- builds the outbound completion request, issues
// it through an injected HTTP sender, and drives the stream processor.
//
// Responsibilities:
// - Compose the prompt and the chat-completion request body
// - Issue the POST with the bearer credential
// - Classify every failure origin into one user-facing message
// - Guarantee exactly one terminal event per invocation
//
// The caller gates invocation: input must be non-empty after trimming and
// no other exchange may be in flight. Neither is re-checked here.

use crate::config::Config;
use crate::model::Model;
use crate::prompt::{compose, Intensity, Style};
use crate::stream::{RephraseEvent, SanitizeMode, StreamProcessor};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest::StatusCode;
use serde::Serialize;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use uuid::Uuid;

/// Sampling temperature sent with every request. Not caller-configurable.
const TEMPERATURE: f64 = 0.7;

/// Output length cap sent with every request. Not caller-configurable.
const MAX_TOKENS: u32 = 2000;

// ---------------------------------------------------------------------------
// Transport types
// ---------------------------------------------------------------------------

/// Errors raised by the HTTP transport itself.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("{0}")]
    Transport(String),
}

/// One outbound completion request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub bearer: String,
    pub body: Bytes,
}

/// Response from the completion endpoint.
///
/// A success status carries the body as a byte stream; a non-success status
/// carries it fully read, for error-message extraction.
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: HttpBody,
}

pub enum HttpBody {
    Stream(Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>),
    Full(Bytes),
}

/// Sends HTTP requests to the completion endpoint.
///
/// Implementations must be Send + Sync so they can be shared via `Arc`.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// ---------------------------------------------------------------------------
// Reqwest HTTP sender
// ---------------------------------------------------------------------------

pub struct ReqwestHttpSender {
    client: reqwest::Client,
}

impl ReqwestHttpSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSender for ReqwestHttpSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let resp = self
            .client
            .post(&request.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(&request.bearer)
            .body(request.body)
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = resp.status();

        if status.is_success() {
            let stream = resp
                .bytes_stream()
                .map_err(|e| HttpError::Transport(e.to_string()));
            Ok(HttpResponse {
                status,
                body: HttpBody::Stream(Box::pin(stream)),
            })
        } else {
            // Error bodies are small; read them fully so the message can be
            // extracted. An unreadable body falls back to the status message.
            let body = resp.bytes().await.unwrap_or_default();
            Ok(HttpResponse {
                status,
                body: HttpBody::Full(body),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

/// Failure origins of one exchange. Every variant surfaces to the caller as
/// plain text via `RephraseEvent::Failed`; no structured error crosses that
/// boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the connection dropped.
    #[error("{0}")]
    Transport(String),

    /// Non-success HTTP status; carries the extracted or derived message.
    #[error("{0}")]
    Upstream(String),

    /// Success status but no readable body stream.
    #[error("no response stream available")]
    StreamUnavailable,
}

/// Derive the user-facing message for a non-success response.
///
/// Preference order: `error.message` in the body, then `error` as a bare
/// string, then a message naming the status code.
pub fn upstream_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(envelope) = serde_json::from_slice::<serde_json::Value>(body) {
        let error = envelope.get("error");

        if let Some(message) = error
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
        {
            return message.to_string();
        }

        if let Some(message) = error.and_then(|e| e.as_str()).filter(|m| !m.is_empty()) {
            return message.to_string();
        }
    }

    format!("request failed: {}", status.as_u16())
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'static str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// ---------------------------------------------------------------------------
// Rephraser
// ---------------------------------------------------------------------------

/// One rephrase invocation: the text plus the two rewrite axes and the
/// model tier. Consumed by `Rephraser::send`.
#[derive(Debug, Clone)]
pub struct RephraseRequest {
    pub input: String,
    pub style: Style,
    pub intensity: Intensity,
    pub model: Model,
}

/// The request orchestrator.
///
/// Owns the HTTP seam and the sanitize mode; each `send` call runs one
/// exchange to a terminal event.
pub struct Rephraser {
    config: Arc<Config>,
    http: Arc<dyn HttpSender>,
    sanitize: SanitizeMode,
}

impl Rephraser {
    /// Production constructor: reqwest transport, per-token sanitization.
    pub fn new(config: Config) -> Self {
        Self::new_with(
            config,
            Arc::new(ReqwestHttpSender::new(reqwest::Client::new())),
            SanitizeMode::PerToken,
        )
    }

    /// Constructor with injected transport, for tests and embedding.
    pub fn new_with(config: Config, http: Arc<dyn HttpSender>, sanitize: SanitizeMode) -> Self {
        Self {
            config: Arc::new(config),
            http,
            sanitize,
        }
    }

    /// Run one exchange, returning its event stream.
    ///
    /// The returned stream yields zero or more `Token` events and then
    /// exactly one terminal event, after which it ends. The exchange is
    /// spawned onto the runtime; dropping the stream stops delivery and
    /// lets the exchange wind down at its next send.
    pub fn send(&self, request: RephraseRequest) -> ReceiverStream<RephraseEvent> {
        let config = self.config.clone();
        let http = self.http.clone();
        let processor = StreamProcessor::new(self.sanitize);
        let (tx, rx) = mpsc::channel::<RephraseEvent>(64);

        tokio::spawn(async move {
            let request_id = Uuid::new_v4().to_string();
            tracing::info!(
                %request_id,
                style = %request.style,
                intensity = %request.intensity,
                model = %request.model,
                input_chars = request.input.chars().count(),
                "rephrase request"
            );

            let outcome = run_exchange(&config, http.as_ref(), &processor, &request, &tx).await;

            if let Err(error) = outcome {
                tracing::warn!(%request_id, %error, "rephrase failed");
                let _ = tx.send(RephraseEvent::Failed(error.to_string())).await;
            }
        });

        ReceiverStream::new(rx)
    }
}

/// Issue the request and pump processor events to the caller.
///
/// `Err` means a pre-stream failure: the caller (the spawned task above)
/// emits the single `Failed` event. `Ok(())` means the processor owned the
/// terminal event.
async fn run_exchange(
    config: &Config,
    http: &dyn HttpSender,
    processor: &StreamProcessor,
    request: &RephraseRequest,
    tx: &mpsc::Sender<RephraseEvent>,
) -> Result<(), ClientError> {
    let prompt = compose(&request.input, request.style, request.intensity);

    let body = CompletionBody {
        model: request.model.provider_id(),
        messages: [ChatMessage {
            role: "user",
            content: &prompt,
        }],
        stream: true,
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };
    let body = serde_json::to_vec(&body)
        .map_err(|e| ClientError::Transport(format!("failed to encode request body: {e}")))?;

    let response = http
        .send(HttpRequest {
            url: config.completions_url(),
            bearer: config.api_key.clone(),
            body: Bytes::from(body),
        })
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    if !response.status.is_success() {
        let body = match response.body {
            HttpBody::Full(bytes) => bytes,
            HttpBody::Stream(_) => Bytes::new(),
        };
        return Err(ClientError::Upstream(upstream_message(
            response.status,
            &body,
        )));
    }

    let byte_stream = match response.body {
        HttpBody::Stream(stream) => stream,
        HttpBody::Full(_) => return Err(ClientError::StreamUnavailable),
    };

    let mut events = processor.process(byte_stream);
    while let Some(event) = events.next().await {
        if tx.send(event).await.is_err() {
            break;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
