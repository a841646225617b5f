//! HTTP/1.x message encoding.
//!
//! The codec turns message heads and payload items into wire bytes, following
//! the [`tokio_util::codec::Encoder`] contract: every encoder appends to a
//! caller owned [`BytesMut`](bytes::BytesMut) and never touches the transport.
//!
//! - Head encoding via the [`header`] encoders
//! - Payload encoding via the [`body`] encoders: raw for `Content-Length`
//!   bodies, `Transfer-Encoding: chunked` framing for streamed ones
//!
//! # Example
//!
//! ```
//! use bytes::{Bytes, BytesMut};
//! use courier_http::codec::ChunkedEncoder;
//! use courier_http::protocol::PayloadItem;
//! use tokio_util::codec::Encoder;
//!
//! let mut encoder = ChunkedEncoder::new();
//! let mut dst = BytesMut::new();
//! encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"foo")), &mut dst).unwrap();
//! encoder.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();
//!
//! assert_eq!(&dst[..], b"3\r\nfoo\r\n0\r\n\r\n");
//! ```

pub mod body;
pub mod header;

pub use body::{ChunkedEncoder, LengthEncoder, PayloadEncoder};
pub use header::{RequestHeadEncoder, ResponseHeadEncoder};
