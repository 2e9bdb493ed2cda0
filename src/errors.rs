//! [`Error`][core::error::Error] implementations used across the crate

use core::fmt::{Display, Formatter};

#[cfg(feature = "json")]
pub mod chat;
#[cfg(feature = "reqwest")]
pub use chat::ChatError;
#[cfg(feature = "json")]
pub use chat::ChunkError;

/// No separator was found before the frame buffer reached its maximum capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTooLarge {
    pub max_capacity: usize,
}

impl Display for FrameTooLarge {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "no separator found within {} bytes of buffered input",
            self.max_capacity
        )
    }
}

impl core::error::Error for FrameTooLarge {}

/// Error produced while splitting a byte source into frames
#[derive(Debug, PartialEq)]
pub enum FrameError<E> {
    /// The byte source failed for a reason other than end-of-stream
    Read(E),
    /// The buffer filled up before a separator turned up
    TooLarge(FrameTooLarge),
}

impl<E> From<FrameTooLarge> for FrameError<E> {
    fn from(value: FrameTooLarge) -> Self {
        Self::TooLarge(value)
    }
}

impl<E> Display for FrameError<E>
where
    E: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::Read(e) => e.fmt(f),
            FrameError::TooLarge(e) => e.fmt(f),
        }
    }
}

impl<E> core::error::Error for FrameError<E>
where
    E: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            FrameError::Read(e) => Some(e),
            FrameError::TooLarge(e) => Some(e),
        }
    }
}

/// Terminal failure of a [pump][crate::pump] run. A clean end of stream or a handler
/// asking to stop are both `Ok(())`, so every variant here is a real failure.
#[derive(Debug)]
pub enum SseReadError<E, H> {
    /// Reading the byte source failed
    Read(E),
    /// An event outgrew the configured maximum buffer
    FrameTooLarge(FrameTooLarge),
    /// The handler rejected an event, passed through untouched
    Handler(H),
    /// The shutdown signal fired before the stream finished
    Cancelled,
}

impl<E, H> SseReadError<E, H> {
    /// True for failures that came from the byte source or the framing, rather than the handler
    pub fn is_stream_err(&self) -> bool {
        matches!(self, Self::Read(_) | Self::FrameTooLarge(_))
    }
}

impl<E, H> From<FrameError<E>> for SseReadError<E, H> {
    fn from(value: FrameError<E>) -> Self {
        match value {
            FrameError::Read(e) => Self::Read(e),
            FrameError::TooLarge(e) => Self::FrameTooLarge(e),
        }
    }
}

impl<E, H> Display for SseReadError<E, H>
where
    E: Display,
    H: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SseReadError::Read(e) => write!(f, "failed to read SSE stream: {e}"),
            SseReadError::FrameTooLarge(e) => write!(f, "failed to read SSE stream: {e}"),
            SseReadError::Handler(e) => e.fmt(f),
            SseReadError::Cancelled => "SSE stream cancelled".fmt(f),
        }
    }
}

impl<E, H> core::error::Error for SseReadError<E, H>
where
    E: core::error::Error + 'static,
    H: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SseReadError::Read(e) => Some(e),
            SseReadError::FrameTooLarge(e) => Some(e),
            SseReadError::Handler(e) => Some(e),
            SseReadError::Cancelled => None,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptySeparator,
    ZeroInitialCapacity,
    InitialExceedsMax { initial: usize, max: usize },
    /// The maximum must leave room for at least one byte of event next to the separator
    MaxTooSmall { max: usize, separator_len: usize },
    MissingApiKey(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptySeparator => "separator must not be empty".fmt(f),
            ConfigError::ZeroInitialCapacity => "initial buffer capacity must not be zero".fmt(f),
            ConfigError::InitialExceedsMax { initial, max } => write!(
                f,
                "initial buffer capacity {initial} exceeds maximum capacity {max}"
            ),
            ConfigError::MaxTooSmall { max, separator_len } => write!(
                f,
                "maximum capacity {max} leaves no room for events next to a {separator_len} byte separator"
            ),
            ConfigError::MissingApiKey(var) => write!(f, "{var} not set"),
        }
    }
}

impl core::error::Error for ConfigError {}
