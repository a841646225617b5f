use crate::protocol::StreamError;
use crate::stream::{Deadline, DuplexStream, ReadableStream, WritableStream};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

/// Adapts a tokio I/O object into a [`DuplexStream`].
///
/// Each write is written fully and flushed before it completes. The transport
/// reports itself closed once a read observes end of file.
#[derive(Debug)]
pub struct IoTransport<T> {
    io: T,
    read_closed: bool,
    write_closed: bool,
}

impl<T> IoTransport<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(io: T) -> Self {
        Self { io, read_closed: false, write_closed: false }
    }
}

#[async_trait]
impl<T> WritableStream for IoTransport<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn write(&mut self, data: Bytes) -> Result<(), StreamError> {
        if self.write_closed {
            return Err(StreamError::Closed);
        }

        self.io.write_all(&data).await?;
        self.io.flush().await?;
        trace!(len = data.len(), "wrote bytes to transport");
        Ok(())
    }
}

#[async_trait]
impl<T> ReadableStream for IoTransport<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read(&mut self, max_bytes: usize, deadline: Deadline) -> Result<Bytes, StreamError> {
        if self.read_closed || max_bytes == 0 {
            return Ok(Bytes::new());
        }

        let mut buf = BytesMut::zeroed(max_bytes);
        let n = deadline.run(self.io.read(&mut buf)).await??;
        if n == 0 {
            trace!("transport reached eof");
            self.read_closed = true;
        }

        buf.truncate(n);
        Ok(buf.freeze())
    }

    fn is_closed(&self) -> bool {
        self.read_closed
    }
}

#[async_trait]
impl<T> DuplexStream for IoTransport<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn close(&mut self) -> Result<(), StreamError> {
        if self.write_closed {
            return Ok(());
        }

        self.write_closed = true;
        self.io.shutdown().await?;
        Ok(())
    }
}
