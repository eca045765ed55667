use crate::controller::FooBarsController;
use crate::di::Container;
use crate::error::Result;
use crate::interceptor::{InterceptorLayer, LoggingInterceptor};
use axum::Router;

/// Build the HTTP application from a container the modules have been registered into.
pub fn router(container: &Container) -> Result<Router> {
    let foo_bars = container.resolve::<FooBarsController>()?;

    let router = Router::new()
        .merge(FooBarsController::router(foo_bars))
        .layer(InterceptorLayer::new(vec![Box::new(LoggingInterceptor)]));
    Ok(router)
}
