// Main entry point - Configuration, wiring and server setup
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smartcity_charts::application::chart_adapter::SeriesChartAdapter;
use smartcity_charts::infrastructure::config::load_app_config;
use smartcity_charts::presentation::app_state::AppState;
use smartcity_charts::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("smartcity_charts=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = load_app_config()?;
    let chart_options = config.charts.chart_options()?;
    tracing::info!(
        "Chart labels at UTC{:+} min, {:?} alignment, max points {:?}",
        config.charts.utc_offset_minutes,
        chart_options.alignment,
        chart_options.max_points
    );

    // Create services (application layer)
    let adapter = SeriesChartAdapter::new(chart_options);
    let state = Arc::new(AppState::new(adapter, config.charts.palette.clone()));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting smartcity-charts service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
