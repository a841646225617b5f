use crate::codec::ResponseHeadEncoder;
use crate::protocol::{Response, SendError};
use crate::serializer::{MessageWriter, SerializerConfig};
use crate::stream::WritableStream;
use bytes::BytesMut;
use std::fmt;
use tokio_util::codec::Encoder;
use tracing::trace;

/// Writes one [`Response`] onto a transport.
///
/// Same algorithm as [`RequestSerializer`](super::RequestSerializer), with a
/// status line instead of a request line and one `Set-Cookie` line per cookie
/// header after the regular headers.
pub struct ResponseSerializer<'t, T: ?Sized> {
    transport: &'t mut T,
    config: SerializerConfig,
}

impl<'t, T> ResponseSerializer<'t, T>
where
    T: WritableStream + ?Sized,
{
    pub fn new(transport: &'t mut T) -> Self {
        Self::with_config(transport, SerializerConfig::default())
    }

    pub fn with_config(transport: &'t mut T, config: SerializerConfig) -> Self {
        Self { transport, config }
    }

    /// Writes the status line, the headers, the cookie headers and the body.
    ///
    /// Completes exactly like [`RequestSerializer::serialize`](super::RequestSerializer::serialize).
    pub async fn serialize(self, response: Response) -> Result<(), SendError> {
        let payload_size = response.payload_size();
        let (mut head, body) = response.into_parts();
        trace!(status = head.status.code().as_u16(), ?payload_size, "serialize response");

        let mut buffer = BytesMut::new();
        ResponseHeadEncoder::new(self.config.get_header_capacity()).encode((&mut head, payload_size), &mut buffer)?;

        MessageWriter::new(self.transport, self.config).write(buffer, payload_size, body).await
    }
}

impl<T: ?Sized> fmt::Debug for ResponseSerializer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseSerializer").field("config", &self.config).finish_non_exhaustive()
    }
}
