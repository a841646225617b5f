//! Start line and header block encoders.
//!
//! Both encoders write the same block layout:
//!
//! ```text
//! <start line>\r\n
//! Name: Value\r\n        (stored order, framing header enforced)
//! Set-Cookie: raw\r\n    (responses only, one per cookie header)
//! \r\n
//! ```
//!
//! Validation runs before the first byte is written, so a rejected head leaves
//! the destination buffer untouched.

use crate::ensure;
use crate::protocol::{Headers, PayloadSize, RequestHead, ResponseHead, SendError, SET_COOKIE};

use bytes::{BufMut, BytesMut};

use http::Version;
use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;
use tracing::error;

/// Initial buffer size allocated for header serialization
pub const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encodes a [`RequestHead`] as `METHOD SP target SP HTTP/x.y` plus its headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeadEncoder {
    capacity: usize,
}

/// Encodes a [`ResponseHead`] as `HTTP/x.y SP code SP reason` plus its headers
/// and cookie headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeadEncoder {
    capacity: usize,
}

impl RequestHeadEncoder {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for RequestHeadEncoder {
    fn default() -> Self {
        Self::new(INIT_HEADER_SIZE)
    }
}

impl ResponseHeadEncoder {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for ResponseHeadEncoder {
    fn default() -> Self {
        Self::new(INIT_HEADER_SIZE)
    }
}

impl Encoder<(&mut RequestHead, PayloadSize)> for RequestHeadEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (&mut RequestHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (head, payload_size) = item;

        let version = version_str(head.version)?;
        head.headers.set_framing(payload_size);
        validate_headers(&head.headers)?;

        dst.reserve(self.capacity);
        write!(FastWrite(dst), "{} {} HTTP/{version}\r\n", head.method, head.target)?;
        put_headers(&head.headers, dst);
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

impl Encoder<(&mut ResponseHead, PayloadSize)> for ResponseHeadEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (&mut ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (head, payload_size) = item;

        let version = version_str(head.version)?;
        ensure!(
            is_valid_value(head.status.reason_phrase()),
            SendError::invalid_header("reason phrase contains a line break")
        );
        head.headers.set_framing(payload_size);
        validate_headers(&head.headers)?;
        for cookie in &head.cookie_headers {
            ensure!(is_valid_value(cookie), SendError::invalid_header("cookie header contains a line break"));
        }

        dst.reserve(self.capacity);
        write!(
            FastWrite(dst),
            "HTTP/{version} {} {}\r\n",
            head.status.code().as_str(),
            head.status.reason_phrase()
        )?;
        put_headers(&head.headers, dst);
        for cookie in &head.cookie_headers {
            put_header(SET_COOKIE, cookie, dst);
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

fn version_str(version: Version) -> Result<&'static str, SendError> {
    match version {
        Version::HTTP_09 => Ok("0.9"),
        Version::HTTP_10 => Ok("1.0"),
        Version::HTTP_11 => Ok("1.1"),
        v => {
            error!(http_version = ?v, "unsupported http version");
            Err(SendError::UnsupportedVersion(v))
        }
    }
}

fn validate_headers(headers: &Headers) -> Result<(), SendError> {
    for (name, value) in headers.iter() {
        ensure!(!name.is_empty(), SendError::invalid_header("empty header name"));
        if !is_valid_name(name) || !is_valid_value(value) {
            error!(header_name = name, "header contains a line break");
            return Err(SendError::invalid_header(format!("header `{}` contains a line break", name.escape_debug())));
        }
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    !name.bytes().any(|b| matches!(b, b'\r' | b'\n' | b':'))
}

fn is_valid_value(value: &str) -> bool {
    !value.bytes().any(|b| matches!(b, b'\r' | b'\n'))
}

fn put_headers(headers: &Headers, dst: &mut BytesMut) {
    for (name, value) in headers.iter() {
        put_header(name, value, dst);
    }
}

fn put_header(name: &str, value: &str, dst: &mut BytesMut) {
    dst.put_slice(name.as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value.as_bytes());
    dst.put_slice(b"\r\n");
}

/// Fast writer implementation for writing to BytesMut.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
