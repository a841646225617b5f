use crate::codec::ChunkedEncoder;
use crate::protocol::{PayloadItem, StreamError};
use crate::stream::{Deadline, DuplexStream, ReadableStream, WritableStream};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::fmt;
use tokio_util::codec::Encoder;
use tracing::{trace, warn};

/// The sink handed to a [`Body::Writer`](crate::protocol::Body::Writer) callback.
///
/// Every non-empty write becomes exactly one chunk, written to the transport in
/// a single transport write. Nothing is buffered across writes. Closing only
/// stops further writes: the terminating chunk is written by the serializer
/// once the callback succeeds.
///
/// The first transport failure is kept for the serializer and the callback sees
/// [`StreamError::Closed`] from then on, so a failed write can't be lost even if
/// the callback ignores it.
pub struct BodyStream<'t, T: ?Sized> {
    transport: &'t mut T,
    encoder: ChunkedEncoder,
    buffer: BytesMut,
    closed: bool,
    failure: Option<StreamError>,
}

impl<'t, T> BodyStream<'t, T>
where
    T: WritableStream + ?Sized,
{
    pub fn new(transport: &'t mut T) -> Self {
        Self { transport, encoder: ChunkedEncoder::new(), buffer: BytesMut::new(), closed: false, failure: None }
    }

    /// Payload bytes written so far, framing excluded.
    pub fn send_size(&self) -> usize {
        self.encoder.send_size()
    }

    /// The transport failure met by a previous write, if any.
    pub(crate) fn take_failure(&mut self) -> Option<StreamError> {
        self.failure.take()
    }

    /// Writes the terminating zero chunk, whether or not the stream was closed.
    pub(crate) async fn finish(&mut self) -> Result<(), StreamError> {
        self.encoder.encode(PayloadItem::<Bytes>::Eof, &mut self.buffer).map_err(StreamError::upstream)?;
        self.closed = true;
        self.transport.write(self.buffer.split().freeze()).await
    }
}

#[async_trait]
impl<T> WritableStream for BodyStream<'_, T>
where
    T: WritableStream + ?Sized,
{
    async fn write(&mut self, data: Bytes) -> Result<(), StreamError> {
        if self.closed || self.failure.is_some() {
            return Err(StreamError::Closed);
        }
        if data.is_empty() {
            return Ok(());
        }

        self.encoder.encode(PayloadItem::Chunk(data), &mut self.buffer).map_err(StreamError::upstream)?;
        let chunk = self.buffer.split().freeze();
        trace!(frame_len = chunk.len(), "write body chunk");
        if let Err(e) = self.transport.write(chunk).await {
            warn!(cause = %e, "failed to write body chunk");
            self.failure = Some(e);
            return Err(StreamError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl<T> ReadableStream for BodyStream<'_, T>
where
    T: WritableStream + ?Sized,
{
    async fn read(&mut self, _max_bytes: usize, _deadline: Deadline) -> Result<Bytes, StreamError> {
        Err(StreamError::ReadUnsupported)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl<T> DuplexStream for BodyStream<'_, T>
where
    T: WritableStream + ?Sized,
{
    async fn close(&mut self) -> Result<(), StreamError> {
        self.closed = true;
        Ok(())
    }
}

impl<T: ?Sized> fmt::Debug for BodyStream<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream")
            .field("encoder", &self.encoder)
            .field("closed", &self.closed)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}
