//! Request interceptors
//!
//! An [`Interceptor`] wraps the rest of the handler chain: it can look at the
//! request before passing it on with [`Next::run`] and at the response after.
//! [`InterceptorLayer`] installs a list of them on an axum router.

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

mod layer;
mod logging;

pub use layer::{InterceptorLayer, InterceptorMiddleware};
pub use logging::LoggingInterceptor;

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by every link of the chain
pub type HandlerFuture = Pin<Box<dyn Future<Output = InterceptorResult> + Send>>;

type BoxedHandler = Box<dyn FnOnce(Request<Body>) -> HandlerFuture + Send>;

/// Represents the next handler in the chain
pub struct Next {
    run: BoxedHandler,
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> HandlerFuture + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
