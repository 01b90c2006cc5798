// Presentation layer - HTTP routes
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    air_quality_dashboard, health_check, list_building_types, list_metrics, multi_sensor_chart,
    realtime_chart, stream_air_quality_dashboard,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/charts/multi-sensor", post(multi_sensor_chart))
        .route("/charts/realtime", post(realtime_chart))
        .route("/dashboards/air-quality", post(air_quality_dashboard))
        .route("/dashboards/air-quality/stream", post(stream_air_quality_dashboard))
        .route("/metrics", get(list_metrics))
        .route("/buildings/types", get(list_building_types))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
