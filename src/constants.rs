pub(crate) const LF: u8 = b'\n';

/// A blank line, which is how SSE servers end an event block.
pub const DEFAULT_SEPARATOR: &[u8] = b"\n\n";
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;
pub const DEFAULT_MAX_CAPACITY: usize = 4096;

// frames in flight between the producer and the control loop
pub(crate) const FRAME_CHANNEL_CAPACITY: usize = 16;

pub(crate) const DATA_PREFIX: &[u8] = b"data:";
pub(crate) const DONE_SENTINEL: &[u8] = b"[DONE]";

#[cfg(feature = "reqwest")]
pub(crate) const API_KEY_VAR: &str = "CHATGPT_API_SECRET";
#[cfg(feature = "reqwest")]
pub(crate) const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
#[cfg(feature = "reqwest")]
pub(crate) const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
