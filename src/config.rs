// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

// Configuration
//
// Upstream endpoint and credential resolution from the environment.
// Lookup is injected so tests never touch the process environment.

/// Default upstream when no override is set.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream base URL, no trailing slash.
    pub base_url: String,
    /// Bearer credential sent with every request.
    pub api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no API credential found: set {key}")]
    MissingApiKey { key: &'static str },
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// Base URL: `REWORD_BASE_URL`, then `OPENAI_BASE_URL`, then the
    /// default. Credential: `REWORD_API_KEY`, then `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an injected variable lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = lookup("REWORD_BASE_URL")
            .or_else(|| lookup("OPENAI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api_key = lookup("REWORD_API_KEY")
            .or_else(|| lookup("OPENAI_API_KEY"))
            .ok_or(ConfigError::MissingApiKey {
                key: "OPENAI_API_KEY",
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Full URL of the chat-completion endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
