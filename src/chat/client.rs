use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChatError, Result};

/// Shown when the backend answers 2xx but without a usable `response`.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Sorry, I encountered an error processing your request.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, alias = "processing_time_ms")]
    pub processing_time: Option<f64>,
}

/// A reply ready to be appended to the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub text: String,
    pub processing_time: Option<f64>,
}

impl From<ChatResponse> for BotReply {
    fn from(response: ChatResponse) -> Self {
        let text = response
            .response
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string());
        Self {
            text,
            processing_time: response.processing_time,
        }
    }
}

/// HTTP client for the INGRES backend (`/api/status`, `/api/chat`).
///
/// One request per call: no retries, no backoff, no queueing.
#[derive(Debug, Clone)]
pub struct ChatClient {
    base_url: String,
    client: Client,
}

impl ChatClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `true` for any 2xx from `/api/status`; everything else counts as disconnected.
    pub async fn check_connection(&self) -> bool {
        match self
            .client
            .get(format!("{}/api/status", self.base_url))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "status check returned non-success");
                false
            }
            Err(e) => {
                warn!("Connection check failed: {}", e);
                false
            }
        }
    }

    pub async fn send_chat(&self, message: &str) -> Result<BotReply> {
        let request = ChatRequest::new(message);
        debug!(timestamp = %request.timestamp, "posting chat message");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatError::StatusError(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.into())
    }
}
