use std::{
    io::{self, Read},
    iter::FusedIterator,
};

use bytes::Bytes;

use crate::{config::FrameConfig, errors::FrameError, splitter::FrameDecoder};

#[derive(Debug, Clone, Copy)]
enum FramesState {
    Reading,
    Draining,
    Done,
}

/// Blocking [`Iterator`] of frames read from a [`Read`].
///
/// Reads only when the buffer holds no complete frame, so one read containing several events
/// yields them all before touching the reader again. Ends after the source is exhausted or after
/// the first error.
#[derive(Debug)]
pub struct Frames<R> {
    reader: R,
    decoder: FrameDecoder,
    state: FramesState,
}

impl<R> Frames<R> {
    /// Frames on a blank line with the default buffer limits
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &FrameConfig::default())
    }

    pub fn with_config(reader: R, config: &FrameConfig) -> Self {
        Self {
            reader,
            decoder: FrameDecoder::new(config),
            state: FramesState::Reading,
        }
    }

    /// Hands the reader back, any buffered bytes are lost
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for Frames<R> {
    type Item = Result<Bytes, FrameError<io::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let decoded = match self.state {
                FramesState::Reading => self.decoder.decode(),
                FramesState::Draining => self.decoder.decode_eof(),
                FramesState::Done => return None,
            };

            match decoded {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => {
                    if let FramesState::Draining = self.state {
                        self.state = FramesState::Done;
                        return None;
                    }
                }
                Err(e) => {
                    self.state = FramesState::Done;
                    return Some(Err(e.into()));
                }
            }

            match self.decoder.read_from(&mut self.reader) {
                Ok(0) => self.state = FramesState::Draining,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.state = FramesState::Done;
                    return Some(Err(FrameError::Read(e)));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for Frames<R> {}
