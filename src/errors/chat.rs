use core::fmt::{Display, Formatter};

#[cfg(feature = "reqwest")]
use crate::errors::SseReadError;

/// Failure inside [`ChatAccumulator`][crate::chat::ChatAccumulator] while handling one event
#[derive(Debug)]
pub enum ChunkError {
    /// The payload was neither `[DONE]` nor a valid completion chunk
    Decode(serde_path_to_error::Error<serde_json::Error>),
    /// Writing the delta to the output sink failed
    Sink(std::io::Error),
}

impl Display for ChunkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ChunkError::Decode(e) => write!(f, "invalid chat completion chunk: {e}"),
            ChunkError::Sink(e) => write!(f, "failed to write chat output: {e}"),
        }
    }
}

impl core::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ChunkError::Decode(e) => Some(e),
            ChunkError::Sink(e) => Some(e),
        }
    }
}

/// Everything that can go wrong with a [`ChatClient::chat`][crate::chat::ChatClient::chat] call
#[cfg(feature = "reqwest")]
#[derive(Debug)]
pub enum ChatError {
    Encode(serde_json::Error),
    Request(reqwest::Error),
    /// The server answered with something other than 2xx, `body` is whatever it sent along
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    Stream(SseReadError<reqwest::Error, ChunkError>),
}

#[cfg(feature = "reqwest")]
impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ChatError::Encode(e) => write!(f, "failed to marshal request body: {e}"),
            ChatError::Request(e) => write!(f, "failed to send request: {e}"),
            ChatError::Status { status, body } => {
                write!(f, "server responded with {status}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            }
            ChatError::Stream(e) => write!(f, "failed to read SSE: {e}"),
        }
    }
}

#[cfg(feature = "reqwest")]
impl core::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ChatError::Encode(e) => Some(e),
            ChatError::Request(e) => Some(e),
            ChatError::Status { .. } => None,
            ChatError::Stream(e) => Some(e),
        }
    }
}
