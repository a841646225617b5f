//! Message serialization.
//!
//! [`RequestSerializer`] and [`ResponseSerializer`] write one message onto a
//! [`WritableStream`](crate::stream::WritableStream). They share one algorithm
//! and differ only in the start line and the response-only `Set-Cookie` lines:
//!
//! 1. the head is encoded into a buffer, enforcing the framing header
//! 2. a buffered body is appended raw and the whole message is written at once
//! 3. a streamed body is written after the head, one chunk per write, then
//!    terminated by the zero chunk:
//!    - a [`Body::Reader`](crate::protocol::Body::Reader) is pulled (at most
//!      [`SerializerConfig::get_read_size`] bytes at a time) until it reports closed
//!    - a [`Body::Writer`](crate::protocol::Body::Writer) callback is handed a
//!      [`BodyStream`] and the zero chunk follows its success
//!
//! `serialize` resolves exactly once, with `Ok(())` or with the first error met.
//! Nothing is retried.

mod body_stream;
mod config;
mod message_writer;
mod request_serializer;
mod response_serializer;

#[cfg(test)]
mod mock;

pub use body_stream::BodyStream;
pub use config::DEFAULT_READ_SIZE;
pub use config::SerializerConfig;
pub use request_serializer::RequestSerializer;
pub use response_serializer::ResponseSerializer;

pub(crate) use message_writer::MessageWriter;
