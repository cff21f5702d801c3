//! Request logging middleware

use http::Request;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Logs `"{method} {uri}"` at info level, then hands the request to the
/// wrapped service unchanged.
///
/// Readiness, response, error and future all come straight from the inner
/// service.
#[derive(Debug, Clone)]
pub struct LogRequests<S> {
    inner: S,
}

impl<S> LogRequests<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped service.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap, returning the wrapped service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, B> Service<Request<B>> for LogRequests<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        tracing::info!("{} {}", req.method(), req.uri());
        self.inner.call(req)
    }
}

/// [`Layer`] that wraps services in [`LogRequests`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequestsLayer;

impl<S> Layer<S> for LogRequestsLayer {
    type Service = LogRequests<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LogRequests::new(inner)
    }
}
