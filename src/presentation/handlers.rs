// HTTP request handlers
use crate::domain::building::BuildingType;
use crate::domain::chart::AlignmentPolicy;
use crate::domain::dashboard::SensorObservations;
use crate::domain::metric::{MetricDetails, MetricKind};
use crate::domain::telemetry::{DataPoint, SensorSeries};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::{ApiError, ApiResult};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSensorChartRequest {
    #[serde(default)]
    pub sensors: Vec<SensorSeries>,
    pub metric_label: String,
    pub alignment: Option<AlignmentPolicy>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeChartRequest {
    /// Reported in errors; defaults to `label`.
    pub sensor_id: Option<String>,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
}

#[derive(Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub sensors: Vec<SensorObservations>,
    #[serde(default)]
    pub metrics: Vec<MetricKind>,
}

async fn respond<T: Serialize + ?Sized>(data: &T, headers: &HeaderMap) -> ApiResult<Response<Body>> {
    json_response(StatusCode::OK, data, accepts_brotli(headers))
        .await
        .map_err(|status| ApiError::Internal(format!("failed to encode response ({})", status)))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Chart several sensor series for one metric
pub async fn multi_sensor_chart(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<MultiSensorChartRequest>,
) -> ApiResult<Response<Body>> {
    let alignment = request
        .alignment
        .unwrap_or(state.chart_adapter.options().alignment);
    let spec = state
        .chart_adapter
        .build_with(&request.sensors, &request.metric_label, alignment)?;

    respond(&spec, &headers).await
}

/// Chart a single live series, labelled to the second
pub async fn realtime_chart(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RealtimeChartRequest>,
) -> ApiResult<Response<Body>> {
    let sensor_id = request.sensor_id.as_deref().unwrap_or(&request.label);
    let spec = state.chart_adapter.realtime(
        sensor_id,
        &request.label,
        &request.color,
        &request.data_points,
    )?;

    respond(&spec, &headers).await
}

/// Build every requested metric chart in one response
pub async fn air_quality_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<DashboardRequest>,
) -> ApiResult<Response<Body>> {
    let charts = state
        .dashboard_service
        .build_dashboard(&request.sensors, &request.metrics)?;

    tracing::info!(
        "Built air-quality dashboard: {} sensors, {} charts",
        request.sensors.len(),
        charts.len()
    );

    respond(&charts, &headers).await
}

/// Stream the dashboard progressively (skeleton, charts, completion)
pub async fn stream_air_quality_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<DashboardRequest>,
) -> impl IntoResponse {
    let rx = state
        .streaming_service
        .stream_dashboard(request.sensors, request.metrics)
        .await;
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}

/// List the metric catalog
pub async fn list_metrics(headers: HeaderMap) -> ApiResult<Response<Body>> {
    let details: Vec<MetricDetails> = MetricKind::ALL.into_iter().map(MetricDetails::from).collect();
    respond(&details, &headers).await
}

/// List building type tags
pub async fn list_building_types(headers: HeaderMap) -> ApiResult<Response<Body>> {
    respond(&BuildingType::ALL[..], &headers).await
}
