use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BufMut, BytesMut};
use std::io;
use std::io::ErrorKind;
use tokio_util::codec::Encoder;
use tracing::{error, warn};

/// Copies payload bytes verbatim, up to the announced `Content-Length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    length: u64,
}

impl LengthEncoder {
    pub fn new(length: u64) -> Self {
        Self { length }
    }

    pub fn is_finish(&self) -> bool {
        self.length == 0
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for LengthEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(mut bytes) => {
                if !bytes.has_remaining() {
                    return Ok(());
                }

                let len = bytes.remaining() as u64;
                if len > self.length {
                    error!(len, remaining = self.length, "payload exceeds the announced content-length");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                }

                while bytes.has_remaining() {
                    let chunk = bytes.chunk();
                    let n = chunk.len();
                    dst.put_slice(chunk);
                    bytes.advance(n);
                }
                self.length -= len;
                Ok(())
            }
            PayloadItem::Eof => {
                if self.length != 0 {
                    warn!(remaining = self.length, "payload ended before the announced content-length");
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn copies_bytes_verbatim() {
        let mut encoder = LengthEncoder::new(3);
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"abc")), &mut dst).unwrap();
        encoder.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();

        assert_eq!(&dst[..], b"abc");
        assert!(encoder.is_finish());
    }

    #[test]
    fn rejects_overflow() {
        let mut encoder = LengthEncoder::new(2);
        let mut dst = BytesMut::new();

        let result = encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"abc")), &mut dst);

        assert!(matches!(result, Err(SendError::Io { .. })));
        assert!(dst.is_empty());
    }
}
