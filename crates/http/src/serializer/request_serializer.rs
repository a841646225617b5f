use crate::codec::RequestHeadEncoder;
use crate::protocol::{Request, SendError};
use crate::serializer::{MessageWriter, SerializerConfig};
use crate::stream::WritableStream;
use bytes::BytesMut;
use std::fmt;
use tokio_util::codec::Encoder;
use tracing::trace;

/// Writes one [`Request`] onto a transport.
///
/// The serializer borrows the transport mutably for the whole call, so a second
/// message can't interleave with the first one.
///
/// ```
/// # use courier_http::protocol::{Request, SendError, StreamError};
/// # use courier_http::serializer::RequestSerializer;
/// # use courier_http::stream::WritableStream;
/// # use bytes::Bytes;
/// # struct Wire(Vec<u8>);
/// # #[async_trait::async_trait]
/// # impl WritableStream for Wire {
/// #     async fn write(&mut self, data: Bytes) -> Result<(), StreamError> {
/// #         self.0.extend_from_slice(&data);
/// #         Ok(())
/// #     }
/// # }
/// # futures::executor::block_on(async {
/// let mut wire = Wire(Vec::new());
/// let request = Request::get("/ping".parse().unwrap()).header("Host", "localhost");
///
/// RequestSerializer::new(&mut wire).serialize(request).await?;
///
/// assert_eq!(wire.0, b"GET /ping HTTP/1.1\r\nContent-Length: 0\r\nHost: localhost\r\n\r\n");
/// # Ok::<(), SendError>(())
/// # }).unwrap();
/// ```
pub struct RequestSerializer<'t, T: ?Sized> {
    transport: &'t mut T,
    config: SerializerConfig,
}

impl<'t, T> RequestSerializer<'t, T>
where
    T: WritableStream + ?Sized,
{
    pub fn new(transport: &'t mut T) -> Self {
        Self::with_config(transport, SerializerConfig::default())
    }

    pub fn with_config(transport: &'t mut T, config: SerializerConfig) -> Self {
        Self { transport, config }
    }

    /// Writes the request line, the headers and the body.
    ///
    /// Resolves once, with the first error met or after the last body byte has
    /// been handed to the transport. A head that can't be encoded is rejected
    /// before anything is written. The upgrade handler, if any, is not part of
    /// the wire format and is dropped: take it with
    /// [`Request::take_upgrade`] beforehand.
    pub async fn serialize(self, request: Request) -> Result<(), SendError> {
        let payload_size = request.payload_size();
        let (mut head, body) = request.into_parts();
        trace!(method = %head.method, target = %head.target, ?payload_size, "serialize request");

        let mut buffer = BytesMut::new();
        RequestHeadEncoder::new(self.config.get_header_capacity()).encode((&mut head, payload_size), &mut buffer)?;

        MessageWriter::new(self.transport, self.config).write(buffer, payload_size, body).await
    }
}

impl<T: ?Sized> fmt::Debug for RequestSerializer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSerializer").field("config", &self.config).finish_non_exhaustive()
    }
}
