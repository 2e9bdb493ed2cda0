use core::{future::Future, ops::ControlFlow};

use futures_core::Stream;
use futures_util::StreamExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, trace};

use crate::{
    config::FrameConfig,
    constants::FRAME_CHANNEL_CAPACITY,
    errors::SseReadError,
    pump::{ControlLoop, Message},
    splitter::FrameStream,
};

/// Aborts the producer task whenever the control loop is done with it, including when the
/// control loop future is dropped half way through
struct Producer(JoinHandle<()>);

impl Drop for Producer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn produce<S, B, E>(frames: FrameStream<S>, tx: mpsc::Sender<Message<E>>)
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    let mut frames = core::pin::pin!(frames);

    let end = loop {
        match frames.next().await {
            Some(Ok(frame)) => {
                trace!(len = frame.len(), "framed event");
                if tx.send(Message::Frame(frame)).await.is_err() {
                    return;
                }
            }
            Some(Err(e)) => break Err(e),
            None => break Ok(()),
        }
    };
    let _ = tx.send(Message::End(end)).await;
}

/// Pumps `stream` through a [`FrameStream`] on a spawned tokio task and calls `handler` for every
/// frame. See the [module docs][crate::pump] for how the run ends.
///
/// Has to be called from inside a tokio runtime. The stream is dropped before this returns on
/// every path except a clean end, where the producer is already finishing by itself.
pub async fn read_stream<S, B, E, F, H>(
    stream: S,
    config: &FrameConfig,
    handler: F,
) -> Result<(), SseReadError<E, H>>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Send + 'static,
    F: FnMut(&[u8]) -> Result<ControlFlow<()>, H>,
{
    read_stream_until(stream, config, handler, core::future::pending()).await
}

/// [`read_stream`] that gives up with [`SseReadError::Cancelled`] as soon as `shutdown` resolves,
/// aborting the pending read.
pub async fn read_stream_until<S, B, E, F, H, C>(
    stream: S,
    config: &FrameConfig,
    mut handler: F,
    shutdown: C,
) -> Result<(), SseReadError<E, H>>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Send + 'static,
    F: FnMut(&[u8]) -> Result<ControlFlow<()>, H>,
    C: Future<Output = ()>,
{
    let (tx, mut rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
    let mut producer = Producer(tokio::spawn(produce(
        FrameStream::with_config(stream, config),
        tx,
    )));
    debug!("sse pump started");

    let mut shutdown = core::pin::pin!(shutdown);
    let mut control = ControlLoop::default();

    loop {
        let message = tokio::select! {
            biased;
            () = &mut shutdown => {
                debug!("sse pump cancelled");
                return Err(SseReadError::Cancelled);
            }
            message = rx.recv() => message,
        };

        let Some(message) = message else {
            // the producer always signs off with Message::End unless it panicked
            return match (&mut producer.0).await {
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                _ => Err(SseReadError::Cancelled),
            };
        };

        if let ControlFlow::Break(outcome) = control.step(&mut handler, message) {
            return outcome;
        }
    }
}
