//! Runs a frame splitter in the background and feeds its frames to a handler in the foreground.
//!
//! A pump is two halves joined by a bounded channel. The producer owns the byte source and does
//! nothing but split it into frames and forward them, followed by exactly one terminal message.
//! The control loop calls the handler for each frame, in order, one at a time, and returns on the
//! first decisive signal:
//!
//! | signal | result |
//! | --- | --- |
//! | source ended cleanly | `Ok(())` |
//! | handler returned `Ok(ControlFlow::Break(()))` | `Ok(())` |
//! | handler returned `Err(h)` | [`SseReadError::Handler`] |
//! | source failed | [`SseReadError::Read`] |
//! | no separator within the buffer limit | [`SseReadError::FrameTooLarge`] |
//! | shutdown future resolved ([`read_stream_until`] only) | [`SseReadError::Cancelled`] |
//!
//! The handler sees each frame with a single `\n` appended, the separator itself is never
//! delivered. The slice is only valid for the duration of the call.

use core::ops::ControlFlow;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::{
    constants::LF,
    errors::{FrameError, SseReadError},
};

pub mod blocking;
pub mod task;

pub use blocking::read_blocking;
pub use task::{read_stream, read_stream_until};

/// What the producer sends to the control loop
#[derive(Debug)]
pub(crate) enum Message<E> {
    Frame(Bytes),
    End(Result<(), FrameError<E>>),
}

/// Foreground half of a pump, shared by the threaded and the async flavours
#[derive(Debug, Default)]
pub(crate) struct ControlLoop {
    scratch: BytesMut,
    delivered: usize,
}

impl ControlLoop {
    /// Handles one message, breaking with the final result once the run is decided
    pub(crate) fn step<E, F, H>(
        &mut self,
        handler: &mut F,
        message: Message<E>,
    ) -> ControlFlow<Result<(), SseReadError<E, H>>>
    where
        F: FnMut(&[u8]) -> Result<ControlFlow<()>, H>,
    {
        let frame = match message {
            Message::Frame(frame) => frame,
            Message::End(Ok(())) => {
                debug!(delivered = self.delivered, "sse stream ended");
                return ControlFlow::Break(Ok(()));
            }
            Message::End(Err(e)) => {
                debug!(
                    delivered = self.delivered,
                    too_large = matches!(e, FrameError::TooLarge(_)),
                    "sse stream failed"
                );
                return ControlFlow::Break(Err(e.into()));
            }
        };

        self.scratch.clear();
        self.scratch.reserve(frame.len() + 1);
        self.scratch.extend_from_slice(&frame);
        self.scratch.put_u8(LF);
        self.delivered += 1;
        trace!(len = frame.len(), "delivering frame");

        match handler(&self.scratch) {
            Ok(ControlFlow::Continue(())) => ControlFlow::Continue(()),
            Ok(ControlFlow::Break(())) => {
                debug!(delivered = self.delivered, "handler stopped the stream");
                ControlFlow::Break(Ok(()))
            }
            Err(e) => {
                debug!(delivered = self.delivered, "handler failed");
                ControlFlow::Break(Err(SseReadError::Handler(e)))
            }
        }
    }
}
