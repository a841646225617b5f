//! HTTP response message.
//!
//! Besides the ordinary headers a [`Response`] keeps its `Set-Cookie` values apart,
//! as fully attributed raw strings, because they are the one header that may not
//! be folded and are emitted line by line after the other headers.

use crate::protocol::{Body, Headers, PayloadSize, Request, UpgradeConnection};
use crate::stream::DuplexStream;
use futures::future::BoxFuture;
use http::{StatusCode, Version};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Status code plus the reason phrase written on the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    code: StatusCode,
    reason: Cow<'static, str>,
}

impl Status {
    pub fn new<R: Into<Cow<'static, str>>>(code: StatusCode, reason: R) -> Self {
        Self { code, reason: reason.into() }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason
    }
}

/// Uses the canonical reason phrase, or none for unregistered codes.
impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        Self { code, reason: Cow::Borrowed(code.canonical_reason().unwrap_or("")) }
    }
}

impl Default for Status {
    fn default() -> Self {
        StatusCode::OK.into()
    }
}

pub struct Response {
    version: Version,
    status: Status,
    headers: Headers,
    cookie_headers: BTreeSet<String>,
    body: Body,
    upgrade: Option<UpgradeConnection>,
}

/// Everything in a [`Response`] but the body.
pub struct ResponseHead {
    pub version: Version,
    pub status: Status,
    pub headers: Headers,
    pub cookie_headers: BTreeSet<String>,
    pub upgrade: Option<UpgradeConnection>,
}

impl Response {
    /// Creates an HTTP/1.1 response.
    pub fn new<S: Into<Status>, B: Into<Body>>(status: S, body: B) -> Self {
        Self::with_headers(status, Headers::new(), body)
    }

    pub fn with_headers<S: Into<Status>, B: Into<Body>>(status: S, headers: Headers, body: B) -> Self {
        let body = body.into();
        let mut headers = headers;
        headers.set_framing(body.payload_size());
        Self {
            version: Version::HTTP_11,
            status: status.into(),
            headers,
            cookie_headers: BTreeSet::new(),
            body,
            upgrade: None,
        }
    }

    pub fn ok<B: Into<Body>>(body: B) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn from_parts(head: ResponseHead, body: Body) -> Self {
        let ResponseHead { version, status, headers, cookie_headers, upgrade } = head;
        Self { version, status, headers, cookie_headers, body, upgrade }
    }

    pub fn into_parts(self) -> (ResponseHead, Body) {
        let Response { version, status, headers, cookie_headers, body, upgrade } = self;
        (ResponseHead { version, status, headers, cookie_headers, upgrade }, body)
    }

    /// Appends a header, builder style.
    #[must_use]
    pub fn header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_status<S: Into<Status>>(&mut self, status: S) {
        self.status = status.into();
    }

    pub fn status_code(&self) -> StatusCode {
        self.status.code
    }

    pub fn reason_phrase(&self) -> &str {
        self.status.reason_phrase()
    }

    /// Whether the status is a client or server error.
    pub fn is_error(&self) -> bool {
        self.is_client_error() || self.is_server_error()
    }

    pub fn is_client_error(&self) -> bool {
        self.status.code.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.code.is_server_error()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Raw `Set-Cookie` values, each one a complete cookie string with its attributes.
    pub fn cookie_headers(&self) -> &BTreeSet<String> {
        &self.cookie_headers
    }

    pub fn add_cookie_header<V: Into<String>>(&mut self, raw: V) -> bool {
        self.cookie_headers.insert(raw.into())
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Swaps the body, updating the framing headers, and returns the previous one.
    pub fn set_body<B: Into<Body>>(&mut self, body: B) -> Body {
        let body = body.into();
        self.headers.set_framing(body.payload_size());
        std::mem::replace(&mut self.body, body)
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn payload_size(&self) -> PayloadSize {
        self.body.payload_size()
    }

    pub fn upgrade(&self) -> Option<&UpgradeConnection> {
        self.upgrade.as_ref()
    }

    pub fn set_upgrade<F>(&mut self, upgrade: F)
    where
        F: FnOnce(Request, Box<dyn DuplexStream>) -> BoxFuture<'static, ()> + Send + 'static,
    {
        self.upgrade = Some(Box::new(upgrade));
    }

    pub fn take_upgrade(&mut self) -> Option<UpgradeConnection> {
        self.upgrade.take()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok(Body::empty())
    }
}

/// Renders the status line and headers, one per line.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?} {} {}", self.version, self.status.code.as_str(), self.status.reason)?;
        write!(f, "{}", self.headers)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("version", &self.version)
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("cookie_headers", &self.cookie_headers)
            .field("body", &self.body)
            .field("upgrade", &self.upgrade.is_some())
            .finish()
    }
}

impl fmt::Debug for ResponseHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseHead")
            .field("version", &self.version)
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("cookie_headers", &self.cookie_headers)
            .finish_non_exhaustive()
    }
}
