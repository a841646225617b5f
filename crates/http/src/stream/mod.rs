//! Stream capabilities consumed by the serializer.
//!
//! The serializer never talks to a socket directly. It writes through a
//! [`WritableStream`], pulls streamed bodies from a [`ReadableStream`] and hands
//! writer-style bodies a [`DuplexStream`]. Any transport can be plugged in by
//! implementing these traits; two adapters are provided:
//!
//! - [`IoTransport`]: wraps a tokio `AsyncRead + AsyncWrite` object (a `TcpStream`,
//!   an in-memory `tokio::io::DuplexStream`, ...)
//! - [`StreamReader`]: turns a `futures::Stream` of byte chunks into a pull based reader

mod io;
mod reader;

pub use io::IoTransport;
pub use reader::StreamReader;

use crate::protocol::StreamError;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tokio::time::Instant;

/// A sink accepting whole byte buffers, preserving the order of successive writes.
#[async_trait]
pub trait WritableStream: Send {
    async fn write(&mut self, data: Bytes) -> Result<(), StreamError>;
}

/// A pull based byte source.
#[async_trait]
pub trait ReadableStream: Send {
    /// Pulls at most `max_bytes` bytes. An empty result does not mean the end of
    /// the stream: check [`ReadableStream::is_closed`] for that.
    async fn read(&mut self, max_bytes: usize, deadline: Deadline) -> Result<Bytes, StreamError>;

    /// Whether the source has been exhausted.
    fn is_closed(&self) -> bool;
}

#[async_trait]
pub trait DuplexStream: ReadableStream + WritableStream {
    async fn close(&mut self) -> Result<(), StreamError>;
}

/// Bounds a single read. `Never` is the default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    #[default]
    Never,
    At(Instant),
}

impl Deadline {
    /// A deadline `duration` from now.
    pub fn after(duration: Duration) -> Self {
        Deadline::At(Instant::now() + duration)
    }

    /// Drives `future` to completion unless the deadline passes first.
    pub(crate) async fn run<F: Future>(self, future: F) -> Result<F::Output, StreamError> {
        match self {
            Deadline::Never => Ok(future.await),
            Deadline::At(instant) => tokio::time::timeout_at(instant, future).await.map_err(|_elapsed| StreamError::Timeout),
        }
    }
}
