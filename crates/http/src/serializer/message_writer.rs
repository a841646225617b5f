use crate::codec::PayloadEncoder;
use crate::protocol::{Body, PayloadItem, PayloadSize, SendError};
use crate::serializer::{BodyStream, SerializerConfig};
use crate::stream::{Deadline, DuplexStream, ReadableStream, WritableStream};
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Encoder;
use tracing::{debug, trace};

/// The part of serialization shared by requests and responses: everything after
/// the head has been encoded.
///
/// A buffered body goes out in the same transport write as the head. A streamed
/// body is sent after the head has been flushed, one chunk per transport write,
/// followed by the terminating zero chunk once the body completed successfully.
pub(crate) struct MessageWriter<'t, T: ?Sized> {
    transport: &'t mut T,
    config: SerializerConfig,
}

impl<'t, T> MessageWriter<'t, T>
where
    T: WritableStream + ?Sized,
{
    pub(crate) fn new(transport: &'t mut T, config: SerializerConfig) -> Self {
        Self { transport, config }
    }

    pub(crate) async fn write(self, mut head: BytesMut, payload_size: PayloadSize, body: Body) -> Result<(), SendError> {
        match body {
            Body::Buffer(bytes) => {
                let mut encoder = PayloadEncoder::from(payload_size);
                encoder.encode(PayloadItem::Chunk(bytes), &mut head)?;
                encoder.encode(PayloadItem::<Bytes>::Eof, &mut head)?;
                self.transport.write(head.freeze()).await.map_err(SendError::transport)
            }
            Body::Reader { mut stream, deadline } => {
                self.transport.write(head.freeze()).await.map_err(SendError::transport)?;
                pump(self.transport, stream.as_mut(), deadline, self.config.get_read_size()).await
            }
            Body::Writer(write_fn) => {
                self.transport.write(head.freeze()).await.map_err(SendError::transport)?;

                let mut body_stream = BodyStream::new(self.transport);
                let result = write_fn(&mut body_stream as &mut dyn DuplexStream).await;
                if let Some(e) = body_stream.take_failure() {
                    debug!(cause = %e, send_size = body_stream.send_size(), "body chunk write failed");
                    return Err(SendError::transport(e));
                }
                if let Err(e) = result {
                    debug!(cause = %e, send_size = body_stream.send_size(), "body writer failed");
                    return Err(SendError::body_writer(e));
                }
                trace!(send_size = body_stream.send_size(), "body writer finished");
                body_stream.finish().await.map_err(SendError::transport)
            }
        }
    }
}

/// Pulls `source` until it reports closed, framing every non-empty pull as a chunk.
async fn pump<T, S>(transport: &mut T, source: &mut S, deadline: Deadline, read_size: usize) -> Result<(), SendError>
where
    T: WritableStream + ?Sized,
    S: ReadableStream + ?Sized,
{
    let mut encoder = PayloadEncoder::chunked();
    let mut buffer = BytesMut::new();

    loop {
        let data = match source.read(read_size, deadline).await {
            Ok(data) => data,
            Err(e) => {
                debug!(cause = %e, "failed to pull body");
                return Err(SendError::body_read(e));
            }
        };

        if !data.is_empty() {
            trace!(len = data.len(), "pulled body chunk");
            encoder.encode(PayloadItem::Chunk(data), &mut buffer)?;
            transport.write(buffer.split().freeze()).await.map_err(SendError::transport)?;
        }

        if source.is_closed() {
            encoder.encode(PayloadItem::<Bytes>::Eof, &mut buffer)?;
            return transport.write(buffer.split().freeze()).await.map_err(SendError::transport);
        }
    }
}
