use courier_http::protocol::{BoxError, Request, Response};
use std::fmt;

/// What a middleware decided to do with the pair it was given.
pub enum Chainer {
    /// Stop the chain and deliver this response.
    Respond(Response),
    /// Hand the (possibly modified) pair to the next middleware.
    Next(Request, Response),
    /// Stop the chain and deliver this error untouched.
    Error(BoxError),
}

impl Chainer {
    pub fn error<E: Into<BoxError>>(e: E) -> Self {
        Chainer::Error(e.into())
    }

    #[inline]
    pub fn is_respond(&self) -> bool {
        matches!(self, Chainer::Respond(_))
    }

    #[inline]
    pub fn is_next(&self) -> bool {
        matches!(self, Chainer::Next(..))
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Chainer::Error(_))
    }

    /// The response carried by `Respond` or `Next`.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Chainer::Respond(response) | Chainer::Next(_, response) => Some(response),
            Chainer::Error(_) => None,
        }
    }

    /// Consumes the outcome, keeping the response carried by `Respond` or `Next`.
    pub fn into_response(self) -> Result<Response, BoxError> {
        match self {
            Chainer::Respond(response) | Chainer::Next(_, response) => Ok(response),
            Chainer::Error(e) => Err(e),
        }
    }
}

impl fmt::Debug for Chainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chainer::Respond(response) => f.debug_tuple("Respond").field(response).finish(),
            Chainer::Next(request, response) => f.debug_tuple("Next").field(request).field(response).finish(),
            Chainer::Error(e) => f.debug_tuple("Error").field(e).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn response_of_each_outcome() {
        let respond = Chainer::Respond(Response::new(StatusCode::NO_CONTENT, ()));
        assert!(respond.is_respond());
        assert_eq!(respond.response().map(Response::status_code), Some(StatusCode::NO_CONTENT));

        let next = Chainer::Next(Request::get("/".parse().unwrap()), Response::ok("hi"));
        assert!(next.is_next());
        assert_eq!(next.into_response().unwrap().status_code(), StatusCode::OK);

        let error = Chainer::error("denied");
        assert!(error.is_error());
        assert!(error.response().is_none());
        assert_eq!(error.into_response().unwrap_err().to_string(), "denied");
    }
}
