use bytes::{Buf, Bytes};

/// An item fed to the payload encoders.
///
/// The serializer produces a sequence of chunks followed by a single `Eof`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem<Data: Buf = Bytes> {
    /// A chunk of payload data
    Chunk(Data),
    /// Marks the end of the payload
    Eof,
}

/// How a message body is framed on the wire.
///
/// - Known length: `Content-Length` header, raw bytes
/// - Chunked: `Transfer-Encoding: chunked`, length-prefixed chunks
/// - Empty: `Content-Length: 0`, nothing after the header block
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked,
    /// Empty payload (no body)
    Empty,
}

impl PayloadSize {
    /// Framing for a fully buffered payload of `len` bytes.
    #[inline]
    pub fn for_length(len: usize) -> Self {
        match len {
            0 => PayloadSize::Empty,
            n => PayloadSize::Length(n as u64),
        }
    }

    /// Returns true if the payload uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    /// Returns true if the payload is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }

    /// The `Content-Length` this framing announces, if any.
    pub fn content_length(&self) -> Option<u64> {
        match self {
            PayloadSize::Length(n) => Some(*n),
            PayloadSize::Empty => Some(0),
            PayloadSize::Chunked => None,
        }
    }
}

impl From<Bytes> for PayloadItem {
    fn from(bytes: Bytes) -> Self {
        PayloadItem::Chunk(bytes)
    }
}
