//! Separator based framing of a byte source.
//!
//! [`FrameDecoder`] owns the bounded buffer and the separator search and knows nothing about where
//! bytes come from. [`Frames`] drives it from a blocking [`Read`], [`FrameStream`] from a
//! [`Stream`][futures_core::Stream] of chunks.

use std::io::{self, Read};

use bytes::{Buf, Bytes, BytesMut};
use memchr::memmem::Finder;

use crate::{config::FrameConfig, errors::FrameTooLarge};

pub mod reader;
pub mod stream;

pub use reader::Frames;
pub use stream::FrameStream;

/// Buffer that turns bytes into frames, each frame being everything before the next separator.
///
/// The buffer never holds more than the configured maximum. Once it is full and still has no
/// separator in it, [`decode`][FrameDecoder::decode] fails with [`FrameTooLarge`].
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    finder: Finder<'static>,
    // `buffer[..filled]` is input, the rest is an initialized window that reads land in
    buffer: BytesMut,
    filled: usize,
    initial_capacity: usize,
    max_capacity: usize,
    // prefix of the input already known not to contain the start of a separator
    searched: usize,
}

impl FrameDecoder {
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            finder: Finder::new(config.separator()).into_owned(),
            buffer: BytesMut::with_capacity(config.initial_capacity()),
            filled: 0,
            initial_capacity: config.initial_capacity(),
            max_capacity: config.max_capacity(),
            searched: 0,
        }
    }

    fn separator_len(&self) -> usize {
        self.finder.needle().len()
    }

    fn max_frame_len(&self) -> usize {
        self.max_capacity - self.separator_len()
    }

    fn too_large(&self) -> FrameTooLarge {
        FrameTooLarge {
            max_capacity: self.max_capacity,
        }
    }

    /// Bytes buffered but not yet handed out as a frame
    pub fn buffered(&self) -> usize {
        self.filled
    }

    /// How many more bytes the buffer accepts before hitting its maximum
    pub fn remaining_capacity(&self) -> usize {
        self.max_capacity - self.filled
    }

    /// Copies as much of `bytes` as fits and returns how many bytes were taken
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let taken = bytes.len().min(self.remaining_capacity());
        let in_window = taken.min(self.buffer.len() - self.filled);

        self.buffer[self.filled..self.filled + in_window].copy_from_slice(&bytes[..in_window]);
        self.buffer.extend_from_slice(&bytes[in_window..taken]);
        self.filled += taken;
        taken
    }

    /// Does a single [`Read::read`] straight into the buffer. `Ok(0)` means the reader hit end of stream.
    ///
    /// Only call this after [`decode`][FrameDecoder::decode] returned `Ok(None)`, that is what
    /// guarantees there is room left to read into.
    pub fn read_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        debug_assert!(self.filled < self.max_capacity, "read into a full frame buffer");

        // only zero fresh memory, a window left over from earlier reads is reused as is
        if self.buffer.len() == self.filled {
            let grown = self.filled + self.filled.max(self.initial_capacity);
            self.buffer.resize(grown.min(self.max_capacity), 0);
        }

        let read = reader.read(&mut self.buffer[self.filled..])?;
        self.filled += read;
        Ok(read)
    }

    /// Splits the next complete frame off the front of the buffer, separator excluded.
    /// Returns `Ok(None)` when more bytes are needed.
    pub fn decode(&mut self) -> Result<Option<Bytes>, FrameTooLarge> {
        let separator_len = self.separator_len();

        match self.finder.find(&self.buffer[self.searched..self.filled]) {
            Some(pos) => {
                // the buffer is capped, so a found frame always fits within max_frame_len
                let len = self.searched + pos;
                let frame = self.buffer.split_to(len).freeze();
                self.buffer.advance(separator_len);
                self.filled -= len + separator_len;
                self.searched = 0;
                Ok(Some(frame))
            }
            None => {
                // the tail could be the first half of a separator, look at it again next time
                self.searched = self.filled.saturating_sub(separator_len - 1);
                if self.filled >= self.max_capacity {
                    Err(self.too_large())
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Like [`decode`][FrameDecoder::decode] but for after the source has ended, the leftover bytes
    /// become one last frame. Keep calling it until it returns `Ok(None)`.
    pub fn decode_eof(&mut self) -> Result<Option<Bytes>, FrameTooLarge> {
        if let Some(frame) = self.decode()? {
            return Ok(Some(frame));
        }
        if self.filled == 0 {
            return Ok(None);
        }
        if self.filled > self.max_frame_len() {
            return Err(self.too_large());
        }
        let frame = self.buffer.split_to(self.filled).freeze();
        self.filled = 0;
        self.searched = 0;
        Ok(Some(frame))
    }
}
