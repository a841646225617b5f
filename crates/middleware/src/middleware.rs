use crate::Chainer;
use async_trait::async_trait;
use courier_http::protocol::{Request, Response};
use std::fmt;
use std::sync::Arc;

/// One step of a middleware chain.
///
/// A middleware receives the request/response pair by value and returns what the
/// chain should do next, see [`Chainer`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn respond(&self, request: Request, response: Response) -> Chainer;
}

#[async_trait]
impl<M> Middleware for Arc<M>
where
    M: Middleware + ?Sized,
{
    async fn respond(&self, request: Request, response: Response) -> Chainer {
        self.as_ref().respond(request, response).await
    }
}

#[async_trait]
impl<M> Middleware for Box<M>
where
    M: Middleware + ?Sized,
{
    async fn respond(&self, request: Request, response: Response) -> Chainer {
        self.as_ref().respond(request, response).await
    }
}

/// a `Fn(Request, Response) -> Future<Output = Chainer>` holder, see [`middleware_fn`]
pub struct MiddlewareFn<F> {
    f: F,
}

/// Lifts an async function into a [`Middleware`].
///
/// ```
/// use courier_middleware::{Chainer, middleware_fn};
///
/// let tag = middleware_fn(|request, response| async move {
///     Chainer::Next(request, response.header("X-Tag", "seen"))
/// });
/// # let _ = tag;
/// ```
pub fn middleware_fn<F, Fut>(f: F) -> MiddlewareFn<F>
where
    F: Fn(Request, Response) -> Fut + Send + Sync,
    Fut: Future<Output = Chainer> + Send,
{
    MiddlewareFn { f }
}

#[async_trait]
impl<F, Fut> Middleware for MiddlewareFn<F>
where
    F: Fn(Request, Response) -> Fut + Send + Sync,
    Fut: Future<Output = Chainer> + Send,
{
    async fn respond(&self, request: Request, response: Response) -> Chainer {
        (self.f)(request, response).await
    }
}

impl<F> fmt::Debug for MiddlewareFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareFn").finish_non_exhaustive()
    }
}
