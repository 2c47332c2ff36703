// Main entry point - Dependency injection, pollers and view server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::{ChartSource, DashboardService, StatusSource};
use crate::infrastructure::config::load_settings;
use crate::infrastructure::http_source::HttpTelemetrySource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = load_settings().context("failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create telemetry source (infrastructure layer)
    let source = Arc::new(
        HttpTelemetrySource::new(&settings.upstream.base_url, settings.upstream.timeout())
            .context("failed to build HTTP client")?,
    );

    // Create dashboard service (application layer)
    let chart_sources = settings
        .charts
        .iter()
        .map(|c| ChartSource {
            id: c.id.clone(),
            label: c.label.clone(),
            color: c.color.clone(),
            path: c.path.clone(),
            interval: c.interval(),
        })
        .collect();
    let status_source = StatusSource {
        path: settings.status.path.clone(),
        interval: settings.status.interval(),
        targets: settings.status.targets(),
    };
    let dashboard = DashboardService::new(
        source,
        chart_sources,
        status_source,
        settings.series_failure,
    );

    tracing::info!(upstream = %settings.upstream.base_url, "starting pollers");
    let pollers = dashboard.start();

    // Build router (presentation layer)
    let state = Arc::new(AppState {
        dashboard,
        refresh_secs: settings.server.refresh_secs,
    });
    let router = router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.server.bind))?;
    tracing::info!(addr = %settings.server.bind, "serving laundry dashboard");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for poller in pollers {
        poller.abort();
    }
    tracing::info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
