use http::Version;
use std::error::Error;
use std::io;
use thiserror::Error;

/// Boxed error used at the user-facing seams: body writers, stream items and middleware.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors raised by the stream capabilities (transports, readers and the chunk adapter).
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("stream has been closed")]
    Closed,

    #[error("read is not supported on this stream")]
    ReadUnsupported,

    #[error("deadline exceeded")]
    Timeout,

    #[error("stream source error: {source}")]
    Source { source: BoxError },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl StreamError {
    pub fn upstream<E: Into<BoxError>>(e: E) -> Self {
        Self::Source { source: e.into() }
    }
}

/// Errors surfaced by a serialize call.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("unsupported http version: {0:?}")]
    UnsupportedVersion(Version),

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("transport error: {source}")]
    Transport { source: StreamError },

    #[error("body read error: {source}")]
    BodyRead { source: StreamError },

    #[error("body writer error: {source}")]
    BodyWriter { source: BoxError },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn transport(e: StreamError) -> Self {
        Self::Transport { source: e }
    }

    pub fn body_read(e: StreamError) -> Self {
        Self::BodyRead { source: e }
    }

    pub fn body_writer<E: Into<BoxError>>(e: E) -> Self {
        Self::BodyWriter { source: e.into() }
    }
}

/// Raised when a [`Body`](crate::protocol::body::Body) is read as a representation it doesn't hold.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyError {
    #[error("body can't be converted to the requested type")]
    InconvertibleType,
}
