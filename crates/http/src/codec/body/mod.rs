//! HTTP body encoding.
//!
//! - [`ChunkedEncoder`]: `Transfer-Encoding: chunked` framing
//! - [`LengthEncoder`]: raw bytes bounded by `Content-Length`
//! - [`PayloadEncoder`]: picks one of the above from a [`PayloadSize`](crate::protocol::PayloadSize)

mod chunked_encoder;
mod length_encoder;
mod payload_encoder;

pub use chunked_encoder::ChunkedEncoder;
pub use length_encoder::LengthEncoder;
pub use payload_encoder::PayloadEncoder;
