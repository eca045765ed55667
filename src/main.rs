use anyhow::Context;
use foobars::config::{AppConfig, ConfigService};
use foobars::lifecycle::shutdown_signal;
use foobars::module::{FooBarsModule, Module};
use foobars::{Container, app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_service(&ConfigService::from_env())?;

    let filter = EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("🚀 Starting FooBars server...");

    let mut container = Container::new();
    FooBarsModule::register(&mut container)?;
    let router = app::router(&container)?;

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!("✅ Server running on http://{}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("🛑 Initiating graceful shutdown...");
        })
        .await
        .context("server terminated with an error")?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
