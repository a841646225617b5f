//! HTTP/1.1 message model and serializer.
//!
//! This crate writes HTTP/1.x requests and responses onto any byte transport. A
//! message body is either a complete buffer, sent with `Content-Length`, or a
//! stream, sent with `Transfer-Encoding: chunked`. Streams come in two shapes: a
//! source the serializer pulls from, or a callback that pushes chunks into a sink
//! the serializer provides.
//!
//! # Modules
//!
//! - [`protocol`]: the message model ([`Request`](protocol::Request),
//!   [`Response`](protocol::Response), [`Body`](protocol::Body), headers and errors)
//! - [`stream`]: the transport capabilities the serializer is written against, with
//!   adapters for tokio I/O objects and `futures` streams
//! - [`codec`]: head and payload encoders built on `tokio_util::codec::Encoder`
//! - [`serializer`]: [`RequestSerializer`](serializer::RequestSerializer) and
//!   [`ResponseSerializer`](serializer::ResponseSerializer)
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use courier_http::protocol::{Body, BoxError, Response};
//! use courier_http::serializer::ResponseSerializer;
//! use courier_http::stream::{IoTransport, WritableStream};
//! use tokio::net::TcpStream;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BoxError> {
//!     let tcp_stream = TcpStream::connect("127.0.0.1:8080").await?;
//!     let mut transport = IoTransport::new(tcp_stream);
//!
//!     let body = Body::writer(|sink| {
//!         Box::pin(async move {
//!             for part in ["hello", " ", "world"] {
//!                 sink.write(Bytes::from_static(part.as_bytes())).await?;
//!             }
//!             Ok::<(), BoxError>(())
//!         })
//!     });
//!     let response = Response::ok(body).header("Content-Type", "text/plain");
//!
//!     ResponseSerializer::new(&mut transport).serialize(response).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Wire format
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Transfer-Encoding: chunked\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! 5\r\nhello\r\n
//! 1\r\n \r\n
//! 5\r\nworld\r\n
//! 0\r\n\r\n
//! ```

pub mod codec;
pub mod protocol;
pub mod serializer;
pub mod stream;

mod utils;
pub(crate) use utils::ensure;
