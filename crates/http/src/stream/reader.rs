use crate::protocol::{BoxError, StreamError};
use crate::stream::{Deadline, ReadableStream};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::trace;

/// A [`ReadableStream`] fed by a `futures::Stream` of byte chunks.
///
/// Chunks larger than the requested read size are handed out over several reads.
/// The reader only knows it is exhausted after the inner stream yields `None`, so
/// the read observing the end returns an empty buffer and flips
/// [`ReadableStream::is_closed`].
#[derive(Debug)]
pub struct StreamReader<S> {
    inner: S,
    pending: Bytes,
    closed: bool,
}

impl<S, E> StreamReader<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin + Send,
    E: Into<BoxError> + Send,
{
    pub fn new(inner: S) -> Self {
        Self { inner, pending: Bytes::new(), closed: false }
    }
}

#[async_trait]
impl<S, E> ReadableStream for StreamReader<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin + Send,
    E: Into<BoxError> + Send,
{
    async fn read(&mut self, max_bytes: usize, deadline: Deadline) -> Result<Bytes, StreamError> {
        if self.pending.is_empty() && !self.closed {
            match deadline.run(self.inner.next()).await? {
                Some(Ok(bytes)) => self.pending = bytes,
                Some(Err(e)) => return Err(StreamError::upstream(e)),
                None => {
                    trace!("stream reader exhausted");
                    self.closed = true;
                }
            }
        }

        let len = self.pending.len().min(max_bytes);
        Ok(self.pending.split_to(len))
    }

    fn is_closed(&self) -> bool {
        self.closed && self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::io;

    #[tokio::test]
    async fn splits_chunks_by_read_size() {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![Ok(Bytes::from_static(b"hello world"))];
        let mut reader = StreamReader::new(stream::iter(chunks));

        assert_eq!(reader.read(5, Deadline::Never).await.unwrap().as_ref(), b"hello");
        assert_eq!(reader.read(5, Deadline::Never).await.unwrap().as_ref(), b" worl");
        assert_eq!(reader.read(5, Deadline::Never).await.unwrap().as_ref(), b"d");
        assert!(!reader.is_closed());

        assert!(reader.read(5, Deadline::Never).await.unwrap().is_empty());
        assert!(reader.is_closed());
    }

    #[tokio::test]
    async fn surfaces_upstream_errors() {
        let chunks: Vec<Result<Bytes, io::Error>> =
            vec![Ok(Bytes::from_static(b"ok")), Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))];
        let mut reader = StreamReader::new(stream::iter(chunks));

        assert_eq!(reader.read(16, Deadline::Never).await.unwrap().as_ref(), b"ok");
        let result = reader.read(16, Deadline::Never).await;

        assert!(matches!(result, Err(StreamError::Source { .. })));
    }

    #[tokio::test]
    async fn pending_stream_times_out() {
        let mut reader = StreamReader::new(stream::pending::<Result<Bytes, io::Error>>());

        let result = reader.read(16, Deadline::after(std::time::Duration::from_millis(10))).await;

        assert!(matches!(result, Err(StreamError::Timeout)));
    }
}
