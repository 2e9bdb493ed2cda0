//! Incremental framing for [Server-Sent Events](https://html.spec.whatwg.org/multipage/server-sent-events.html)
//! (SSE) style byte streams, built for consuming streamed chat completions.
//!
//! `sseframe` splits an arbitrarily chunked byte stream into events on a separator (a blank line
//! by default) and hands each event to your handler exactly once, in order. It only frames: it
//! does not parse `event:`/`id:` fields, reconnect or retry.
//!
//! - [`Frames`] - blocking [`Iterator`] of frames over any [`std::io::Read`].
//! - [`FrameStream`] - the same over a [`Stream`][futures_core::Stream] of byte chunks, such as
//!   an HTTP response body.
//! - [`pump`] - runs either one on a background thread or task and calls a handler for every
//!   frame on the foreground, stopping when the handler says so, the source ends or fails, or an
//!   event outgrows the buffer limit.
//! - [`payload`] - small helpers for `data: ...` / `[DONE]` style events.
//! - [`chat`] (requires `json`) - OpenAI style completion chunks and a handler that accumulates
//!   their deltas; with `reqwest` also a [`ChatClient`][chat::ChatClient] that sends the request.
//!
//! # Pumping a blocking reader
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use sseframe::{FrameConfig, payload, pump};
//!
//! let body: &[u8] = b"data: hello\n\ndata: [DONE]\n\ndata: never seen\n\n";
//! let mut output = String::new();
//!
//! pump::read_blocking(body, &FrameConfig::default(), |event| {
//!     let data = payload::data(event);
//!     if payload::is_done(data) {
//!         return Ok(ControlFlow::Break(()));
//!     }
//!     match std::str::from_utf8(data) {
//!         Ok(text) => output.push_str(text),
//!         Err(_) => return Err("not utf8"),
//!     }
//!     Ok(ControlFlow::Continue(()))
//! })
//! .unwrap();
//!
//! assert_eq!(output, "hello");
//! ```
//!
//! # Pumping a byte stream
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use bytes::Bytes;
//! use sseframe::{FrameConfig, pump};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let chunks = vec![
//!     Ok::<_, std::io::Error>(Bytes::from("data: he")),
//!     Ok(Bytes::from("llo\n\ndata: world\n\n")),
//! ];
//! let mut events = Vec::new();
//!
//! pump::read_stream(futures::stream::iter(chunks), &FrameConfig::default(), |event| {
//!     events.push(event.to_vec());
//!     Ok::<_, ()>(ControlFlow::Continue(()))
//! })
//! .await
//! .unwrap();
//!
//! // every event arrives with exactly one trailing line break
//! assert_eq!(events, [b"data: hello\n".to_vec(), b"data: world\n".to_vec()]);
//! # }
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `json` | off | Provides [`chat`] with [`serde`] types for completion chunks and the [`ChatAccumulator`][chat::ChatAccumulator] handler. Decode errors carry their JSON path via [`serde_path_to_error`]. |
//! | `reqwest` | off | Provides [`ChatClient`][chat::ChatClient], which sends the request with [`reqwest`] and pumps the response body. Turns on `json`. |

pub mod config;
pub(crate) mod constants;
pub mod errors;
pub mod payload;
pub mod pump;
pub mod splitter;

#[cfg(feature = "json")]
pub mod chat;

pub use config::FrameConfig;
pub use constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY, DEFAULT_SEPARATOR};
pub use splitter::{FrameDecoder, FrameStream, Frames};
