//! Sequential dispatch over an ordered set of middleware.

use crate::{Chainer, Middleware};
use arc_swap::ArcSwap;
use courier_http::protocol::{Request, Response};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Threads `(request, response)` through `middlewares` in order.
///
/// Each middleware runs only after the previous one resolved. The first
/// `Respond` or `Error` is returned as is and the remaining middleware are
/// never invoked. When every middleware says `Next`, the last pair is returned
/// as `Next`; an empty slice returns the initial pair untouched.
pub async fn chain(middlewares: &[Arc<dyn Middleware>], request: Request, response: Response) -> Chainer {
    let mut request = request;
    let mut response = response;

    for (index, middleware) in middlewares.iter().enumerate() {
        match middleware.respond(request, response).await {
            Chainer::Next(next_request, next_response) => {
                trace!(index, "middleware passed to next");
                request = next_request;
                response = next_response;
            }
            Chainer::Respond(response) => {
                debug!(index, status = response.status_code().as_u16(), "middleware responded, chain stopped");
                return Chainer::Respond(response);
            }
            Chainer::Error(e) => {
                debug!(index, cause = %e, "middleware failed, chain stopped");
                return Chainer::Error(e);
            }
        }
    }

    Chainer::Next(request, response)
}

/// A shareable, live-updatable middleware sequence.
///
/// Every [`Middlewares::chain`] call runs over the snapshot loaded when it
/// started; [`push`](Middlewares::push) and [`push_front`](Middlewares::push_front)
/// only affect later runs.
pub struct Middlewares {
    inner: ArcSwap<Vec<Arc<dyn Middleware>>>,
}

impl Middlewares {
    pub fn builder() -> MiddlewaresBuilder {
        MiddlewaresBuilder::new()
    }

    pub fn empty() -> Self {
        Self::builder().build()
    }

    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }

    /// The current sequence, unaffected by later updates.
    pub fn snapshot(&self) -> Arc<Vec<Arc<dyn Middleware>>> {
        self.inner.load_full()
    }

    /// Appends a middleware for subsequent runs.
    pub fn push<M: Middleware + 'static>(&self, middleware: M) {
        let middleware: Arc<dyn Middleware> = Arc::new(middleware);
        self.inner.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().map(Arc::clone));
            next.push(Arc::clone(&middleware));
            next
        });
    }

    /// Prepends a middleware for subsequent runs.
    pub fn push_front<M: Middleware + 'static>(&self, middleware: M) {
        let middleware: Arc<dyn Middleware> = Arc::new(middleware);
        self.inner.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(Arc::clone(&middleware));
            next.extend(current.iter().map(Arc::clone));
            next
        });
    }

    /// Runs [`chain`] over the current snapshot.
    pub async fn chain(&self, request: Request, response: Response) -> Chainer {
        let snapshot = self.snapshot();
        trace!(len = snapshot.len(), "start middleware chain");
        chain(&snapshot, request, response).await
    }
}

impl Default for Middlewares {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Middlewares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middlewares").field("len", &self.len()).finish()
    }
}

pub struct MiddlewaresBuilder {
    inner: Vec<Arc<dyn Middleware>>,
}

impl MiddlewaresBuilder {
    fn new() -> Self {
        Self { inner: vec![] }
    }

    #[must_use]
    pub fn add_last<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.inner.push(Arc::new(middleware));
        self
    }

    #[must_use]
    pub fn add_first<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.inner.insert(0, Arc::new(middleware));
        self
    }

    pub fn build(self) -> Middlewares {
        Middlewares { inner: ArcSwap::from_pointee(self.inner) }
    }
}

impl fmt::Debug for MiddlewaresBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewaresBuilder").field("len", &self.inner.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::MockMiddleware;
    use crate::middleware_fn;
    use http::StatusCode;
    use std::sync::Mutex;

    fn pair() -> (Request, Response) {
        (Request::get("/".parse().unwrap()), Response::ok(()))
    }

    fn passing(times: usize) -> MockMiddleware {
        let mut mock = MockMiddleware::new();
        mock.expect_respond().times(times).returning(Chainer::Next);
        mock
    }

    fn never_called() -> MockMiddleware {
        let mut mock = MockMiddleware::new();
        mock.expect_respond().never();
        mock
    }

    fn recording(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> impl Middleware + 'static {
        let log = Arc::clone(log);
        middleware_fn(move |request, response| {
            log.lock().unwrap().push(name);
            async move { Chainer::Next(request, response) }
        })
    }

    #[tokio::test]
    async fn empty_chain_returns_the_pair_untouched() {
        let request = Request::get("/untouched".parse().unwrap()).header("X-Id", "7");
        let response = Response::new(StatusCode::ACCEPTED, "body");

        let outcome = chain(&[], request, response).await;

        let Chainer::Next(request, response) = outcome else { panic!("expected Next") };
        assert_eq!(request.path(), "/untouched");
        assert_eq!(request.headers().get("x-id"), Some("7"));
        assert_eq!(response.status_code(), StatusCode::ACCEPTED);
        assert_eq!(response.body().as_buffer().unwrap().as_ref(), b"body");
    }

    #[tokio::test]
    async fn respond_short_circuits() {
        let mut responder = MockMiddleware::new();
        responder
            .expect_respond()
            .times(1)
            .returning(|_request, _response| Chainer::Respond(Response::new(StatusCode::UNAUTHORIZED, ())));

        let middlewares: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(passing(1)), Arc::new(passing(1)), Arc::new(responder), Arc::new(never_called()), Arc::new(never_called())];
        let (request, response) = pair();

        let outcome = chain(&middlewares, request, response).await;

        assert!(outcome.is_respond());
        assert_eq!(outcome.response().map(Response::status_code), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn error_short_circuits() {
        let mut failing = MockMiddleware::new();
        failing.expect_respond().times(1).returning(|_request, _response| Chainer::error("rate limited"));

        let middlewares: Vec<Arc<dyn Middleware>> = vec![Arc::new(passing(1)), Arc::new(failing), Arc::new(never_called())];
        let (request, response) = pair();

        let outcome = chain(&middlewares, request, response).await;

        let Chainer::Error(e) = outcome else { panic!("expected Error") };
        assert_eq!(e.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn runs_in_order_and_threads_mutations() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let add_header = middleware_fn(|request: Request, response: Response| async move {
            Chainer::Next(request, response.header("X-Step", "1"))
        });
        let read_header = middleware_fn(|request: Request, response: Response| async move {
            let step = response.headers().get("X-Step").unwrap_or("none").to_owned();
            Chainer::Next(request.header("X-Seen-Step", step), response)
        });

        let middlewares: Vec<Arc<dyn Middleware>> = vec![
            Arc::new(recording(&log, "first")),
            Arc::new(add_header),
            Arc::new(recording(&log, "second")),
            Arc::new(read_header),
            Arc::new(recording(&log, "third")),
        ];
        let (request, response) = pair();

        let outcome = chain(&middlewares, request, response).await;

        let Chainer::Next(request, response) = outcome else { panic!("expected Next") };
        assert_eq!(request.headers().get("X-Seen-Step"), Some("1"));
        assert_eq!(response.headers().get("X-Step"), Some("1"));
        assert_eq!(*log.lock().unwrap(), ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn builder_orders_middleware() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let middlewares = Middlewares::builder()
            .add_last(recording(&log, "b"))
            .add_last(recording(&log, "c"))
            .add_first(recording(&log, "a"))
            .build();
        let (request, response) = pair();

        let outcome = middlewares.chain(request, response).await;

        assert!(outcome.is_next());
        assert_eq!(middlewares.len(), 3);
        assert_eq!(*log.lock().unwrap(), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn updates_do_not_affect_a_running_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let middlewares = Arc::new(Middlewares::empty());

        let registry = Arc::clone(&middlewares);
        let late_log = Arc::clone(&log);
        middlewares.push(middleware_fn(move |request, response| {
            registry.push_front(recording(&late_log, "front"));
            registry.push(recording(&late_log, "back"));
            async move { Chainer::Next(request, response) }
        }));
        middlewares.push(recording(&log, "original"));

        let (request, response) = pair();
        middlewares.chain(request, response).await;
        assert_eq!(*log.lock().unwrap(), ["original"]);
        assert_eq!(middlewares.len(), 4);

        log.lock().unwrap().clear();
        let snapshot = middlewares.snapshot();
        let (request, response) = pair();
        chain(&snapshot, request, response).await;
        assert_eq!(*log.lock().unwrap(), ["front", "original", "back"]);
    }
}
