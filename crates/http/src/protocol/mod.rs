//! HTTP message model.
//!
//! This module holds the passive data types the serializer consumes:
//!
//! - **Messages** ([`request`], [`response`]): [`Request`] and [`Response`], plus their
//!   bodiless [`RequestHead`] and [`ResponseHead`] halves
//! - **Bodies** ([`body`]): [`Body`], a buffer, a pull based reader or a push based writer
//! - **Headers** ([`headers`]): [`Headers`], an ordered case-insensitive multimap
//! - **Framing** ([`message`]): [`PayloadSize`] and [`PayloadItem`], what the encoders work with
//! - **Errors**:[`StreamError`], [`SendError`] and [`BodyError`]
//!
//! Messages carry no behavior beyond accessors. The one invariant they maintain
//! themselves is that the framing headers match the body: a buffered body is
//! announced with `Content-Length`, a streamed one with `Transfer-Encoding: chunked`.

pub mod body;
pub use body::Body;
pub use body::WriteFn;

pub mod headers;
pub use headers::Headers;
pub use headers::{CONTENT_LENGTH, SET_COOKIE, TRANSFER_ENCODING};

pub mod message;
pub use message::PayloadItem;
pub use message::PayloadSize;

pub mod request;
pub use request::Request;
pub use request::RequestHead;
pub use request::UpgradeConnection;

pub mod response;
pub use response::Response;
pub use response::ResponseHead;
pub use response::Status;

mod error;
pub use error::BodyError;
pub use error::BoxError;
pub use error::SendError;
pub use error::StreamError;
