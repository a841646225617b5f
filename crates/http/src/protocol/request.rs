//! HTTP request message.
//!
//! A [`Request`] owns its start line fields, an ordered [`Headers`] map and a
//! [`Body`]. Creating a request, or replacing its body, keeps the framing headers
//! in line with the body representation.

use crate::protocol::{Body, Headers, PayloadSize};
use crate::stream::DuplexStream;
use futures::future::BoxFuture;
use http::{Method, Uri, Version};
use mime::Mime;
use std::fmt;

/// Takes over the connection once the message exchange is done, e.g. after a
/// `101 Switching Protocols` response.
pub type UpgradeConnection = Box<dyn FnOnce(Request, Box<dyn DuplexStream>) -> BoxFuture<'static, ()> + Send>;

pub struct Request {
    method: Method,
    target: Uri,
    version: Version,
    headers: Headers,
    body: Body,
    upgrade: Option<UpgradeConnection>,
}

/// Everything in a [`Request`] but the body.
pub struct RequestHead {
    pub method: Method,
    pub target: Uri,
    pub version: Version,
    pub headers: Headers,
    pub upgrade: Option<UpgradeConnection>,
}

impl Request {
    /// Creates an HTTP/1.1 request.
    pub fn new<B: Into<Body>>(method: Method, target: Uri, body: B) -> Self {
        Self::with_headers(method, target, Headers::new(), body)
    }

    pub fn with_headers<B: Into<Body>>(method: Method, target: Uri, headers: Headers, body: B) -> Self {
        let body = body.into();
        let mut headers = headers;
        headers.set_framing(body.payload_size());
        Self { method, target, version: Version::HTTP_11, headers, body, upgrade: None }
    }

    pub fn get(target: Uri) -> Self {
        Self::new(Method::GET, target, Body::empty())
    }

    pub fn from_parts(head: RequestHead, body: Body) -> Self {
        let RequestHead { method, target, version, headers, upgrade } = head;
        Self { method, target, version, headers, body, upgrade }
    }

    pub fn into_parts(self) -> (RequestHead, Body) {
        let Request { method, target, version, headers, body, upgrade } = self;
        (RequestHead { method, target, version, headers, upgrade }, body)
    }

    /// Appends a header, builder style.
    #[must_use]
    pub fn header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn target(&self) -> &Uri {
        &self.target
    }

    pub fn set_target(&mut self, target: Uri) {
        self.target = target;
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
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

    pub fn path(&self) -> &str {
        self.target.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.target.query()
    }

    pub fn host(&self) -> Option<&str> {
        self.headers.get("Host")
    }

    pub fn set_host<V: Into<String>>(&mut self, host: V) {
        self.headers.insert("Host", host);
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get("User-Agent")
    }

    pub fn set_user_agent<V: Into<String>>(&mut self, user_agent: V) {
        self.headers.insert("User-Agent", user_agent);
    }

    pub fn authorization(&self) -> Option<&str> {
        self.headers.get("Authorization")
    }

    pub fn set_authorization<V: Into<String>>(&mut self, authorization: V) {
        self.headers.insert("Authorization", authorization);
    }

    /// The raw `Cookie` header, parsing it is left to the caller.
    pub fn cookie_header(&self) -> Option<&str> {
        self.headers.get("Cookie")
    }

    /// Media types listed in the `Accept` header.
    ///
    /// Parameters such as `q=0.9` are dropped and entries that don't parse are skipped.
    pub fn accept(&self) -> Vec<Mime> {
        let Some(accept) = self.headers.get("Accept") else {
            return Vec::new();
        };

        accept
            .split(',')
            .filter_map(|media_range| media_range.split(';').next())
            .filter_map(|media_type| media_type.trim().parse::<Mime>().ok())
            .collect()
    }

    pub fn set_accept(&mut self, media_types: &[Mime]) {
        let value = media_types
            .iter()
            .map(|mime| format!("{}/{}", mime.type_(), mime.subtype()))
            .collect::<Vec<_>>()
            .join(", ");
        self.headers.insert("Accept", value);
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("target", &self.target)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("upgrade", &self.upgrade.is_some())
            .finish()
    }
}

impl fmt::Debug for RequestHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHead")
            .field("method", &self.method)
            .field("target", &self.target)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CONTENT_LENGTH, TRANSFER_ENCODING};
    use crate::stream::StreamReader;
    use bytes::Bytes;
    use futures::stream;
    use std::io;

    fn streamed() -> Body {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![Ok(Bytes::from_static(b"foo"))];
        Body::reader(StreamReader::new(stream::iter(chunks)))
    }

    #[test]
    fn buffered_request_announces_length() {
        let request = Request::new(Method::POST, Uri::from_static("/submit"), "abc");

        assert_eq!(request.version(), Version::HTTP_11);
        assert_eq!(request.headers().get(CONTENT_LENGTH), Some("3"));
        assert!(!request.headers().contains(TRANSFER_ENCODING));
    }

    #[test]
    fn streamed_request_is_chunked() {
        let request = Request::new(Method::PUT, Uri::from_static("/upload"), streamed());

        assert_eq!(request.headers().get(TRANSFER_ENCODING), Some("chunked"));
        assert!(!request.headers().contains(CONTENT_LENGTH));
    }

    #[test]
    fn set_body_updates_framing() {
        let mut request = Request::new(Method::POST, Uri::from_static("/"), streamed());

        let previous = request.set_body("hello");

        assert!(previous.is_reader());
        assert_eq!(request.headers().get(CONTENT_LENGTH), Some("5"));
        assert!(!request.headers().contains(TRANSFER_ENCODING));
    }

    #[test]
    fn caller_headers_keep_their_order() {
        let headers: Headers = [("Host", "example.com"), ("Accept", "*/*")].into_iter().collect();
        let request = Request::with_headers(Method::GET, Uri::from_static("/"), headers, Body::empty());

        let names: Vec<_> = request.headers().iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Host", "Accept", CONTENT_LENGTH]);
    }

    #[test]
    fn target_accessors() {
        let request = Request::get(Uri::from_static("/index/?a=1&b=2"));

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/index/");
        assert_eq!(request.query(), Some("a=1&b=2"));
    }

    #[test]
    fn well_known_headers() {
        let mut request = Request::get(Uri::from_static("/")).header("cookie", "a=1; b=2");

        request.set_host("127.0.0.1:8080");
        request.set_user_agent("curl/7.79.1");
        request.set_authorization("Bearer token");

        assert_eq!(request.host(), Some("127.0.0.1:8080"));
        assert_eq!(request.user_agent(), Some("curl/7.79.1"));
        assert_eq!(request.authorization(), Some("Bearer token"));
        assert_eq!(request.cookie_header(), Some("a=1; b=2"));
    }

    #[test]
    fn accept_parses_media_types() {
        let request = Request::get(Uri::from_static("/"))
            .header("Accept", "text/html,application/xhtml+xml;q=0.9, not a mime ,*/*;q=0.8");

        let accept = request.accept();

        assert_eq!(accept, vec![mime::TEXT_HTML, "application/xhtml+xml".parse::<Mime>().unwrap(), mime::STAR_STAR]);
    }

    #[test]
    fn set_accept_renders_list() {
        let mut request = Request::get(Uri::from_static("/"));

        request.set_accept(&[mime::APPLICATION_JSON, mime::TEXT_PLAIN_UTF_8]);

        assert_eq!(request.headers().get("accept"), Some("application/json, text/plain"));
    }

    #[test]
    fn upgrade_handler_round_trips() {
        let mut request = Request::get(Uri::from_static("/chat"));
        assert!(request.upgrade().is_none());

        request.set_upgrade(|_request, _stream| Box::pin(async {}));

        assert!(request.upgrade().is_some());
        assert!(request.take_upgrade().is_some());
        assert!(request.upgrade().is_none());
    }
}
