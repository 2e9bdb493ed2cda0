use core::ops::ControlFlow;
use std::{
    io::{self, Read},
    sync::mpsc,
    thread,
};

use tracing::{debug, trace};

use crate::{
    config::FrameConfig,
    constants::FRAME_CHANNEL_CAPACITY,
    errors::SseReadError,
    pump::{ControlLoop, Message},
    splitter::Frames,
};

fn produce<R: Read>(frames: Frames<R>, tx: mpsc::SyncSender<Message<io::Error>>) {
    let mut end = Ok(());
    for frame in frames {
        match frame {
            Ok(frame) => {
                trace!(len = frame.len(), "framed event");
                if tx.send(Message::Frame(frame)).is_err() {
                    return;
                }
            }
            Err(e) => {
                end = Err(e);
                break;
            }
        }
    }
    let _ = tx.send(Message::End(end));
}

/// Pumps a blocking `reader` through [`Frames`] on a background thread and calls `handler` for
/// every frame on the calling thread. See the [module docs][crate::pump] for how the run ends.
///
/// There is no way to interrupt a blocking read, so when the handler stops early the producer
/// thread is left to finish the read it is stuck in. It exits as soon as that read returns,
/// closing whatever `reader` wraps makes that happen right away.
pub fn read_blocking<R, F, H>(
    reader: R,
    config: &FrameConfig,
    mut handler: F,
) -> Result<(), SseReadError<io::Error, H>>
where
    R: Read + Send + 'static,
    F: FnMut(&[u8]) -> Result<ControlFlow<()>, H>,
{
    let (tx, rx) = mpsc::sync_channel(FRAME_CHANNEL_CAPACITY);
    let frames = Frames::with_config(reader, config);
    let producer = thread::spawn(move || produce(frames, tx));
    debug!("sse pump started");

    let mut control = ControlLoop::default();
    loop {
        let message = match rx.recv() {
            Ok(message) => message,
            Err(mpsc::RecvError) => match producer.join() {
                Err(panic) => std::panic::resume_unwind(panic),
                Ok(()) => unreachable!("frame producer returned without a terminal message"),
            },
        };

        if let ControlFlow::Break(outcome) = control.step(&mut handler, message) {
            return outcome;
        }
    }
}
