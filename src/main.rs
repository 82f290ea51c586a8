// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use reword::client::{RephraseRequest, Rephraser, ReqwestHttpSender};
use reword::config::Config;
use reword::model::Model;
use reword::prompt::{Intensity, Style};
use reword::stream::{RephraseEvent, SanitizeMode};

use std::io::Write as _;
use std::sync::Arc;
use tokio_stream::StreamExt;

#[derive(Parser)]
#[command(name = "reword", about = "Rewrite text in a chosen style via a streaming completion API")]
struct Cli {
    /// Text to rephrase; read from stdin when omitted
    input: Option<String>,

    /// Rewrite style
    #[arg(long, default_value = "conversational")]
    style: Style,

    /// Rewrite intensity
    #[arg(long, default_value = "natural")]
    intensity: Intensity,

    /// Model tier
    #[arg(long, default_value = "mini")]
    model: Model,

    /// Emit tokens verbatim, skipping per-token sanitization
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = match cli.input {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf) {
                tracing::error!("failed to read stdin: {e}");
                std::process::exit(1);
            }
            buf
        }
    };

    // The library does not re-validate; gating empty input is the caller's
    // job, and this binary is the caller.
    let input = input.trim().to_string();
    if input.is_empty() {
        tracing::error!("nothing to rephrase: input is empty");
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let sanitize = if cli.raw {
        SanitizeMode::Off
    } else {
        SanitizeMode::PerToken
    };

    let rephraser = Rephraser::new_with(
        config,
        Arc::new(ReqwestHttpSender::new(reqwest::Client::new())),
        sanitize,
    );

    let mut events = rephraser.send(RephraseRequest {
        input,
        style: cli.style,
        intensity: cli.intensity,
        model: cli.model,
    });

    let mut out = std::io::stdout();
    while let Some(event) = events.next().await {
        match event {
            RephraseEvent::Token(token) => {
                print!("{token}");
                let _ = out.flush();
            }
            RephraseEvent::Done => {
                println!();
                return;
            }
            RephraseEvent::Failed(message) => {
                tracing::error!(%message, "rephrase failed");
                std::process::exit(1);
            }
        }
    }
}
