//! OpenAI style chat completion chunks and a pump handler that stitches their deltas together

use core::ops::ControlFlow;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{errors::ChunkError, payload};

#[cfg(feature = "reqwest")]
pub mod client;
#[cfg(feature = "reqwest")]
pub use client::{ChatClient, ChatConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

/// Body of a streaming `/v1/chat/completions` request
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
}

/// One `data:` payload of a streamed completion
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: Delta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Delta {
    pub role: Option<String>,
    pub content: Option<String>,
}

/// Pump handler for a chat completion stream.
///
/// Every content delta is written to `sink` as it arrives and kept so the whole reply can be
/// returned at the end. Stops at `[DONE]`; comments and empty events are skipped.
#[derive(Debug)]
pub struct ChatAccumulator<W> {
    sink: W,
    output: String,
    chunks: usize,
}

impl<W: Write> ChatAccumulator<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            output: String::new(),
            chunks: 0,
        }
    }

    pub fn handle(&mut self, event: &[u8]) -> Result<ControlFlow<()>, ChunkError> {
        if payload::is_comment(event) {
            return Ok(ControlFlow::Continue(()));
        }

        let data = payload::data(event);
        if payload::is_done(data) {
            self.sink.flush().map_err(ChunkError::Sink)?;
            return Ok(ControlFlow::Break(()));
        }
        if data.is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        let mut deserializer = serde_json::Deserializer::from_slice(data);
        let chunk: ChatCompletionChunk =
            serde_path_to_error::deserialize(&mut deserializer).map_err(ChunkError::Decode)?;
        self.chunks += 1;

        for content in chunk.choices.into_iter().filter_map(|choice| choice.delta.content) {
            self.sink
                .write_all(content.as_bytes())
                .map_err(ChunkError::Sink)?;
            self.output.push_str(&content);
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Number of JSON chunks decoded so far
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}
