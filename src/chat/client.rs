use core::fmt::{Debug, Formatter};
use std::io::Write;

use http_body_util::BodyDataStream;
use reqwest::{
    Body,
    header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HeaderValue},
};
use tracing::debug;

use crate::{
    chat::{ChatAccumulator, ChatRequest, Message},
    config::FrameConfig,
    constants::{API_KEY_VAR, DEFAULT_ENDPOINT, DEFAULT_MODEL},
    errors::{ChatError, ConfigError},
    pump,
};

/// Where to send chat requests and how to frame the replies
#[derive(Clone)]
pub struct ChatConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub frame: FrameConfig,
}

// keeps the key out of logs
impl Debug for ChatConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("frame", &self.frame)
            .finish()
    }
}

impl ChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            frame: FrameConfig::default(),
        }
    }

    /// Reads the API key from `CHATGPT_API_SECRET`, everything else keeps its default
    pub fn from_env() -> Result<Self, ConfigError> {
        std::env::var(API_KEY_VAR)
            .map(Self::new)
            .map_err(|_| ConfigError::MissingApiKey(API_KEY_VAR))
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_frame_config(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }
}

/// Streaming chat completion client
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: ChatConfig,
    http: reqwest::Client,
}

impl ChatClient {
    pub fn new(config: ChatConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Sends `input` as a single user message, see [`complete`][ChatClient::complete]
    pub async fn chat<W: Write>(&self, input: &str, sink: W) -> Result<String, ChatError> {
        self.complete(&[Message::user(input)], sink).await
    }

    /// Requests a streamed completion and writes each content delta to `sink` as it arrives.
    ///
    /// Returns the full reply once the server sends `[DONE]` or closes the stream. Text already
    /// written to `sink` stays there when the call fails part way through.
    pub async fn complete<W: Write>(
        &self,
        messages: &[Message],
        sink: W,
    ) -> Result<String, ChatError> {
        let body = serde_json::to_vec(&ChatRequest {
            model: &self.config.model,
            messages,
            stream: true,
        })
        .map_err(ChatError::Encode)?;

        debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            messages = messages.len(),
            "sending chat completion request"
        );
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .bearer_auth(&self.config.api_key)
            .body(body)
            .send()
            .await
            .map_err(ChatError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "chat completion request rejected");
            return Err(ChatError::Status { status, body });
        }

        let mut accumulator = ChatAccumulator::new(sink);
        pump::read_stream(
            BodyDataStream::new(Body::from(response)),
            &self.config.frame,
            |event| accumulator.handle(event),
        )
        .await
        .map_err(ChatError::Stream)?;

        debug!(chunks = accumulator.chunks(), "chat completion finished");
        Ok(accumulator.into_output())
    }
}
