use core::{
    pin::Pin,
    task::{Context, Poll, ready},
};

use bytes::{Buf, Bytes};
use futures_core::{Stream, stream::FusedStream};

use crate::{config::FrameConfig, errors::FrameError, splitter::FrameDecoder};

#[derive(Debug, Clone, Copy)]
enum FrameStreamState {
    Streaming,
    Draining,
    Terminated,
}

impl FrameStreamState {
    fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    fn is_draining(&self) -> bool {
        matches!(self, Self::Draining)
    }
}

pin_project_lite::pin_project! {
    /// [`Stream`] that turns a stream of byte chunks into frames, same rules as [`Frames`][super::Frames].
    ///
    /// Chunks bigger than the room left in the frame buffer are parked and fed in as frames get
    /// split off, so a large chunk full of small events never counts as an oversized frame.
    #[project = FrameStreamProjection]
    #[derive(Debug)]
    pub struct FrameStream<S> {
        #[pin]
        stream: S,
        decoder: FrameDecoder,
        pending: Bytes,
        state: FrameStreamState,
    }
}

impl<S> FrameStream<S> {
    /// Frames on a blank line with the default buffer limits
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, &FrameConfig::default())
    }

    pub fn with_config(stream: S, config: &FrameConfig) -> Self {
        Self {
            stream,
            decoder: FrameDecoder::new(config),
            pending: Bytes::new(),
            state: FrameStreamState::Streaming,
        }
    }
}

impl<S, E, B> Stream for FrameStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Bytes, FrameError<E>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            let decoded = match *this.state {
                FrameStreamState::Streaming => this.decoder.decode(),
                FrameStreamState::Draining => this.decoder.decode_eof(),
                FrameStreamState::Terminated => return Poll::Ready(None),
            };

            match decoded {
                Ok(Some(frame)) => return Poll::Ready(Some(Ok(frame))),
                Ok(None) if this.state.is_draining() => {
                    *this.state = FrameStreamState::Terminated;
                    return Poll::Ready(None);
                }
                Ok(None) => {}
                Err(e) => {
                    *this.state = FrameStreamState::Terminated;
                    return Poll::Ready(Some(Err(e.into())));
                }
            }

            // decode just made room, so this always moves forward
            if !this.pending.is_empty() {
                let taken = this.decoder.feed(this.pending);
                this.pending.advance(taken);
                continue;
            }

            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(chunk)) => {
                    let chunk = chunk.as_ref();
                    let taken = this.decoder.feed(chunk);
                    if taken < chunk.len() {
                        *this.pending = Bytes::copy_from_slice(&chunk[taken..]);
                    }
                }
                Some(Err(e)) => {
                    *this.state = FrameStreamState::Terminated;
                    return Poll::Ready(Some(Err(FrameError::Read(e))));
                }
                None => *this.state = FrameStreamState::Draining,
            }
        }
    }
}

impl<S, E, B> FusedStream for FrameStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FrameTooLarge;
    use futures::prelude::*;

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Result<Bytes, ()>> {
        futures::stream::iter(
            parts
                .iter()
                .map(|part| Ok(Bytes::from_static(part.as_bytes())))
                .collect::<Vec<_>>(),
        )
    }

    fn frames(strs: &[&'static str]) -> Vec<Bytes> {
        strs.iter().map(|s| Bytes::from_static(s.as_bytes())).collect()
    }

    #[tokio::test]
    async fn hello_then_done() {
        assert_eq!(
            FrameStream::new(chunks(&["data: hello\n\ndata: [DONE]\n\n"]))
                .try_collect::<Vec<_>>()
                .await
                .unwrap(),
            frames(&["data: hello", "data: [DONE]"])
        );

        assert_eq!(
            FrameStream::new(chunks(&["data: he", "llo\n\ndata: [DONE]\n\n"]))
                .try_collect::<Vec<_>>()
                .await
                .unwrap(),
            frames(&["data: hello", "data: [DONE]"])
        );

        assert_eq!(
            FrameStream::new(chunks(&["data: partial"]))
                .try_collect::<Vec<_>>()
                .await
                .unwrap(),
            frames(&["data: partial"])
        );
    }

    #[tokio::test]
    async fn empty_chunks_are_skipped() {
        assert_eq!(
            FrameStream::new(chunks(&["", "data: a", "", "\n", "", "\n", ""]))
                .try_collect::<Vec<_>>()
                .await
                .unwrap(),
            frames(&["data: a"])
        );
    }

    #[tokio::test]
    async fn every_split_point_gives_the_same_frames() {
        let input = "data: one\n\ndata: two\n\n\n\ndata: three";
        let expected = frames(&["data: one", "data: two", "", "data: three"]);

        for at in 0..=input.len() {
            let (head, tail) = input.split_at(at);
            let stream = futures::stream::iter(vec![
                Ok::<_, ()>(head.as_bytes().to_vec()),
                Ok::<_, ()>(tail.as_bytes().to_vec()),
            ]);
            assert_eq!(
                FrameStream::new(stream)
                    .try_collect::<Vec<_>>()
                    .await
                    .unwrap(),
                expected,
                "split at {at}"
            );
        }
    }

    #[tokio::test]
    async fn chunk_larger_than_the_buffer() {
        let config = FrameConfig::new("\n\n", 16, 16).unwrap();
        let chunk = "event\n\n".repeat(40);

        let frames = FrameStream::with_config(
            futures::stream::iter(vec![Ok::<_, ()>(chunk.into_bytes())]),
            &config,
        )
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

        assert_eq!(frames.len(), 40);
        assert!(frames.iter().all(|frame| frame == "event"));
    }

    #[tokio::test]
    async fn oversized_frame_ends_the_stream() {
        let config = FrameConfig::new("\n\n", 8, 8).unwrap();
        let results = FrameStream::with_config(chunks(&["ok\n\n", "waytoolong\n\n", "late\n\n"]), &config)
            .collect::<Vec<_>>()
            .await;

        assert_eq!(
            results,
            vec![
                Ok(Bytes::from_static(b"ok")),
                Err(FrameError::TooLarge(FrameTooLarge { max_capacity: 8 })),
            ]
        );
    }

    #[tokio::test]
    async fn transport_errors_end_the_stream() {
        let mut stream = FrameStream::new(futures::stream::iter(vec![
            Ok(Bytes::from_static(b"data: a\n\ndata: b")),
            Err("connection reset"),
            Ok(Bytes::from_static(b"\n\n")),
        ]));

        assert_eq!(stream.next().await, Some(Ok(Bytes::from_static(b"data: a"))));
        assert_eq!(
            stream.next().await,
            Some(Err(FrameError::Read("connection reset")))
        );
        assert!(stream.is_terminated());
        assert_eq!(stream.next().await, None);
    }
}
