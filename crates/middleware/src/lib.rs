//! Sequential middleware chaining over `courier-http` messages.
//!
//! A [`Middleware`] takes a request/response pair and answers with a [`Chainer`]:
//!
//! - [`Chainer::Next`]: pass the (possibly modified) pair on
//! - [`Chainer::Respond`]: stop and deliver a response
//! - [`Chainer::Error`]: stop and deliver an error
//!
//! [`chain`] runs a slice of middleware strictly one after another, and
//! [`Middlewares`] is a shareable registry whose runs each use the snapshot taken
//! when they started.
//!
//! # Example
//!
//! ```
//! use courier_http::protocol::{Request, Response};
//! use courier_middleware::{Chainer, Middlewares, middleware_fn};
//! use http::StatusCode;
//!
//! # futures::executor::block_on(async {
//! let middlewares = Middlewares::builder()
//!     .add_last(middleware_fn(|request, response: Response| async move {
//!         Chainer::Next(request, response.header("X-Frame-Options", "DENY"))
//!     }))
//!     .add_last(middleware_fn(|request: Request, response| async move {
//!         if request.authorization().is_none() {
//!             return Chainer::Respond(Response::new(StatusCode::UNAUTHORIZED, ()));
//!         }
//!         Chainer::Next(request, response)
//!     }))
//!     .build();
//!
//! let outcome = middlewares.chain(Request::get("/".parse().unwrap()), Response::ok(())).await;
//! assert_eq!(outcome.response().map(Response::status_code), Some(StatusCode::UNAUTHORIZED));
//! # });
//! ```

mod chain;
mod chainer;
mod middleware;

pub use chain::{Middlewares, MiddlewaresBuilder, chain};
pub use chainer::Chainer;
pub use middleware::{Middleware, MiddlewareFn, middleware_fn};
