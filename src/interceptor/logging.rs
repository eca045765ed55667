use crate::interceptor::{Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{body::Body, http::Request};
use std::time::Instant;

/// An interceptor that logs request timing and status
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let start = Instant::now();

        tracing::debug!(%method, %uri, "request started");

        match next.run(request).await {
            Ok(response) => {
                let status = response.status();
                let elapsed_ms = millis_since(start);
                if status.is_server_error() {
                    tracing::warn!(%method, %uri, status = status.as_u16(), elapsed_ms, "request finished");
                } else {
                    tracing::info!(%method, %uri, status = status.as_u16(), elapsed_ms, "request finished");
                }
                Ok(response)
            }
            Err(e) => {
                let elapsed_ms = millis_since(start);
                tracing::error!(%method, %uri, error = %e, elapsed_ms, "request failed");
                Err(e)
            }
        }
    }
}

fn millis_since(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
