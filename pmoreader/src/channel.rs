//! Push-based byte source.
//!
//! A producer (network task, decoder, test) pushes chunks through a
//! [`SourceSender`]; the consumer side is a [`ChannelSource`] implementing
//! `AsyncRead`, which a [`StreamTokenizer`](crate::StreamTokenizer) can wrap.
//! A read that cannot be satisfied yet suspends until a chunk arrives, the
//! sender is dropped (end of stream) or the producer reports a failure.

use std::{
    io,
    pin::Pin,
    task::{Context, Poll, ready},
};

use bytes::{Buf, Bytes};
use tokio::{
    io::{AsyncRead, ReadBuf},
    sync::mpsc,
};

use crate::error::ReaderError;

/// Channel capacity used by [`channel`] callers that have no better idea.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Creates a connected sender/source pair with bounded capacity.
pub fn channel(capacity: usize) -> (SourceSender, ChannelSource) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (SourceSender { tx }, ChannelSource::new(rx))
}

/// Producer half of a push source.
#[derive(Clone)]
pub struct SourceSender {
    tx: mpsc::Sender<Result<Bytes, ReaderError>>,
}

impl SourceSender {
    /// Pushes a chunk, waiting while the channel is full.
    pub async fn push(&self, chunk: impl Into<Bytes>) -> Result<(), ReaderError> {
        self.tx
            .send(Ok(chunk.into()))
            .await
            .map_err(|_| ReaderError::Closed)
    }

    /// Terminates the source with an error; the pending read observes it.
    pub async fn fail(self, err: io::Error) {
        if self.tx.send(Err(err.into())).await.is_err() {
            tracing::debug!("push source failed after the consumer went away");
        }
    }

    /// Ends the stream cleanly. Equivalent to dropping every sender clone.
    pub fn close(self) {}
}

/// Consumer half of a push source.
pub struct ChannelSource {
    rx: mpsc::Receiver<Result<Bytes, ReaderError>>,
    current: Bytes,
    failure: Option<ReaderError>,
    finished: bool,
}

impl ChannelSource {
    fn new(rx: mpsc::Receiver<Result<Bytes, ReaderError>>) -> Self {
        Self {
            rx,
            current: Bytes::new(),
            failure: None,
            finished: false,
        }
    }
}

impl AsyncRead for ChannelSource {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        loop {
            if !self.current.is_empty() {
                let n = buf.remaining().min(self.current.len());
                buf.put_slice(&self.current[..n]);
                self.current.advance(n);
                return Poll::Ready(Ok(()));
            }

            // Once failed, every later read fails the same way.
            if let Some(err) = &self.failure {
                return Poll::Ready(Err(err.to_io()));
            }

            if self.finished {
                return Poll::Ready(Ok(()));
            }

            match ready!(self.rx.poll_recv(cx)) {
                Some(Ok(bytes)) => self.current = bytes,
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "push source failed");
                    self.failure = Some(err);
                }
                None => self.finished = true,
            }
        }
    }
}
