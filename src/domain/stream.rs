// Progressive dashboard stream messages
use super::dashboard::MetricChart;
use super::metric::MetricKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSkeleton {
    pub metric: MetricKind,
    pub title: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSkeleton {
    pub sensor_ids: Vec<String>,
    pub charts: Vec<ChartSkeleton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub total_widgets: usize,
    pub duration_ms: u64,
}

/// One frame of a streamed dashboard: the skeleton first, then a chart (or
/// error) per metric in completion order, then a completion event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton(DashboardSkeleton),
    Chart(MetricChart),
    Error { metric: MetricKind, message: String },
    Complete(CompletionEvent),
}
