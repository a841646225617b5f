use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BufMut, BytesMut};
use std::io::Write;
use tokio_util::codec::Encoder;
use tracing::{trace, warn};

/// Frames payload items as `Transfer-Encoding: chunked`.
///
/// Every chunk becomes `<hex length>\r\n<data>\r\n`, the end of the payload
/// becomes `0\r\n\r\n`. An empty chunk encodes to nothing, since on the wire it
/// would read as the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedEncoder {
    eof: bool,
    send_size: usize,
}

impl ChunkedEncoder {
    pub fn new() -> Self {
        Self { eof: false, send_size: 0 }
    }

    /// Whether the terminating chunk has been encoded.
    pub fn is_finish(&self) -> bool {
        self.eof
    }

    /// Payload bytes encoded so far, framing excluded.
    pub fn send_size(&self) -> usize {
        self.send_size
    }
}

impl Default for ChunkedEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for ChunkedEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.eof {
            warn!("encode payload item after the last chunk, ignored");
            return Ok(());
        }

        match item {
            PayloadItem::Chunk(mut bytes) => {
                let len = bytes.remaining();
                if len == 0 {
                    return Ok(());
                }

                dst.reserve(len + 12);
                write!(helper::Writer(dst), "{len:x}\r\n")?;
                while bytes.has_remaining() {
                    let chunk = bytes.chunk();
                    let n = chunk.len();
                    dst.put_slice(chunk);
                    bytes.advance(n);
                }
                dst.put_slice(b"\r\n");
                self.send_size += len;
                trace!(len, "encoded chunk");
                Ok(())
            }
            PayloadItem::Eof => {
                self.eof = true;
                dst.put_slice(b"0\r\n\r\n");
                Ok(())
            }
        }
    }
}

mod helper {
    use bytes::{BufMut, BytesMut};
    use std::io;

    pub struct Writer<'a>(pub &'a mut BytesMut);

    impl io::Write for Writer<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.put_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn encode_all(items: Vec<PayloadItem>) -> BytesMut {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();
        for item in items {
            encoder.encode(item, &mut dst).unwrap();
        }
        dst
    }

    #[test]
    fn frames_each_chunk() {
        let dst = encode_all(vec![
            PayloadItem::Chunk(Bytes::from_static(b"ab")),
            PayloadItem::Chunk(Bytes::from_static(b"cd")),
            PayloadItem::Eof,
        ]);

        assert_eq!(&dst[..], b"2\r\nab\r\n2\r\ncd\r\n0\r\n\r\n");
    }

    #[test]
    fn chunk_size_is_lowercase_hex() {
        let dst = encode_all(vec![PayloadItem::Chunk(Bytes::from(vec![b'x'; 255]))]);

        assert!(dst.starts_with(b"ff\r\n"));
        assert!(dst.ends_with(b"x\r\n"));
        assert_eq!(dst.len(), 4 + 255 + 2);
    }

    #[test]
    fn empty_chunk_is_skipped() {
        let dst = encode_all(vec![
            PayloadItem::Chunk(Bytes::new()),
            PayloadItem::Chunk(Bytes::from_static(b"foo")),
            PayloadItem::Eof,
        ]);

        assert_eq!(&dst[..], b"3\r\nfoo\r\n0\r\n\r\n");
    }

    #[test]
    fn nothing_after_eof() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();
        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"late")), &mut dst).unwrap();
        encoder.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();

        assert!(encoder.is_finish());
        assert_eq!(&dst[..], b"0\r\n\r\n");
    }

    #[test]
    fn counts_payload_bytes() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"hello")), &mut dst).unwrap();
        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"!")), &mut dst).unwrap();

        assert_eq!(encoder.send_size(), 6);
        assert!(!encoder.is_finish());
    }
}
