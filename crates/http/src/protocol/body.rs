//! Message bodies.
//!
//! A [`Body`] is one of three representations, fixed when it is created:
//!
//! - [`Body::Buffer`]: the complete payload, sent with `Content-Length`
//! - [`Body::Reader`]: a [`ReadableStream`] the serializer pulls from
//! - [`Body::Writer`]: a callback pushing chunks into a sink the serializer provides
//!
//! Both streaming representations are sent with `Transfer-Encoding: chunked`.

use crate::protocol::{BodyError, BoxError, PayloadSize};
use crate::stream::{Deadline, DuplexStream, ReadableStream};
use bytes::Bytes;
use futures::future::BoxFuture;
use std::fmt;

/// The callback behind [`Body::Writer`].
///
/// It receives the chunk sink and resolves once it is done writing: `Ok(())` lets the
/// serializer terminate the body, an error aborts the message.
pub type WriteFn = Box<dyn for<'a> FnOnce(&'a mut dyn DuplexStream) -> BoxFuture<'a, Result<(), BoxError>> + Send>;

pub enum Body {
    Buffer(Bytes),
    Reader { stream: Box<dyn ReadableStream>, deadline: Deadline },
    Writer(WriteFn),
}

impl Body {
    pub fn empty() -> Self {
        Body::Buffer(Bytes::new())
    }

    pub fn reader<R>(stream: R) -> Self
    where
        R: ReadableStream + 'static,
    {
        Self::reader_with_deadline(stream, Deadline::Never)
    }

    /// A streamed body whose every pull is bounded by `deadline`.
    pub fn reader_with_deadline<R>(stream: R, deadline: Deadline) -> Self
    where
        R: ReadableStream + 'static,
    {
        Body::Reader { stream: Box::new(stream), deadline }
    }

    /// A streamed body produced by `f`.
    ///
    /// ```
    /// use bytes::Bytes;
    /// use courier_http::protocol::{Body, BoxError};
    /// use courier_http::stream::WritableStream;
    ///
    /// let body = Body::writer(|sink| {
    ///     Box::pin(async move {
    ///         sink.write(Bytes::from_static(b"hello")).await?;
    ///         Ok::<(), BoxError>(())
    ///     })
    /// });
    /// assert!(body.is_writer());
    /// ```
    pub fn writer<F>(f: F) -> Self
    where
        F: for<'a> FnOnce(&'a mut dyn DuplexStream) -> BoxFuture<'a, Result<(), BoxError>> + Send + 'static,
    {
        Body::Writer(Box::new(f))
    }

    #[inline]
    pub fn is_buffer(&self) -> bool {
        matches!(self, Body::Buffer(_))
    }

    #[inline]
    pub fn is_reader(&self) -> bool {
        matches!(self, Body::Reader { .. })
    }

    #[inline]
    pub fn is_writer(&self) -> bool {
        matches!(self, Body::Writer(_))
    }

    pub fn as_buffer(&self) -> Result<&Bytes, BodyError> {
        match self {
            Body::Buffer(bytes) => Ok(bytes),
            _ => Err(BodyError::InconvertibleType),
        }
    }

    pub fn into_buffer(self) -> Result<Bytes, BodyError> {
        match self {
            Body::Buffer(bytes) => Ok(bytes),
            _ => Err(BodyError::InconvertibleType),
        }
    }

    /// How this body will be framed on the wire.
    pub fn payload_size(&self) -> PayloadSize {
        match self {
            Body::Buffer(bytes) => PayloadSize::for_length(bytes.len()),
            Body::Reader { .. } | Body::Writer(_) => PayloadSize::Chunked,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Buffer(bytes) => f.debug_tuple("Buffer").field(bytes).finish(),
            Body::Reader { deadline, .. } => f.debug_struct("Reader").field("deadline", deadline).finish_non_exhaustive(),
            Body::Writer(_) => f.write_str("Writer"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Buffer(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Buffer(bytes.into())
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Buffer(Bytes::from(value))
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Body::Buffer(Bytes::from_static(value.as_bytes()))
    }
}

impl From<()> for Body {
    fn from((): ()) -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StreamReader;
    use futures::stream;
    use std::io;

    fn reader_body() -> Body {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![Ok(Bytes::from_static(b"foo"))];
        Body::reader(StreamReader::new(stream::iter(chunks)))
    }

    #[test]
    fn exactly_one_variant_is_active() {
        let buffer = Body::from("abc");
        assert!(buffer.is_buffer() && !buffer.is_reader() && !buffer.is_writer());

        let reader = reader_body();
        assert!(reader.is_reader() && !reader.is_buffer() && !reader.is_writer());

        let writer = Body::writer(|_sink| Box::pin(async { Ok::<(), BoxError>(()) }));
        assert!(writer.is_writer() && !writer.is_buffer() && !writer.is_reader());
    }

    #[test]
    fn buffer_converts_to_bytes() {
        let body = Body::from(vec![1u8, 2, 3]);
        assert_eq!(body.as_buffer().unwrap().as_ref(), [1, 2, 3]);
        assert_eq!(body.into_buffer().unwrap(), Bytes::from_static(&[1, 2, 3]));
    }

    #[test]
    fn streamed_body_is_inconvertible() {
        let body = reader_body();
        assert_eq!(body.as_buffer().unwrap_err(), BodyError::InconvertibleType);
        assert_eq!(body.into_buffer().unwrap_err(), BodyError::InconvertibleType);
    }

    #[test]
    fn payload_size_follows_variant() {
        assert_eq!(Body::from("abc").payload_size(), PayloadSize::Length(3));
        assert_eq!(Body::empty().payload_size(), PayloadSize::Empty);
        assert_eq!(reader_body().payload_size(), PayloadSize::Chunked);
    }
}
