// Streaming dashboard service - Progressive loading, one frame per chart
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::SensorObservations;
use crate::domain::metric::MetricKind;
use crate::domain::stream::{ChartSkeleton, CompletionEvent, DashboardSkeleton, StreamMessage};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard: Arc<DashboardService>,
}

impl StreamingDashboardService {
    pub fn new(dashboard: Arc<DashboardService>) -> Self {
        Self { dashboard }
    }

    pub async fn stream_dashboard(
        &self,
        sensors: Vec<SensorObservations>,
        metrics: Vec<MetricKind>,
    ) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let start_time = Instant::now();

        let metrics = if metrics.is_empty() {
            MetricKind::ALL.to_vec()
        } else {
            metrics
        };

        // 1. Skeleton goes out before any chart is built
        let skeleton = build_skeleton(&sensors, &metrics);
        let total_widgets = skeleton.charts.len();
        let _ = tx.send(StreamMessage::Skeleton(skeleton)).await;

        tracing::debug!(
            "Streaming {} charts for {} sensors",
            total_widgets,
            sensors.len()
        );

        // 2. One task per metric chart
        let sensors = Arc::new(sensors);
        let mut handles = Vec::with_capacity(metrics.len());
        for metric in metrics {
            let tx = tx.clone();
            let dashboard = self.dashboard.clone();
            let sensors = sensors.clone();

            handles.push(tokio::spawn(async move {
                let msg = match dashboard.build_metric_chart(&sensors, metric) {
                    Ok(chart) => StreamMessage::Chart(chart),
                    Err(e) => {
                        tracing::warn!("Chart {} failed: {}", metric.key(), e);
                        StreamMessage::Error {
                            metric,
                            message: e.to_string(),
                        }
                    }
                };
                let _ = tx.send(msg).await;
            }));
        }

        // 3. Completion once every chart task has finished
        tokio::spawn(async move {
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::error!("Chart task panicked: {}", e);
                }
            }

            let duration_ms = start_time.elapsed().as_millis() as u64;
            let complete = CompletionEvent {
                total_widgets,
                duration_ms,
            };
            let _ = tx.send(StreamMessage::Complete(complete)).await;
        });

        rx
    }
}

fn build_skeleton(sensors: &[SensorObservations], metrics: &[MetricKind]) -> DashboardSkeleton {
    let charts = metrics
        .iter()
        .map(|m| ChartSkeleton {
            metric: *m,
            title: m.title().to_string(),
            unit: m.unit().to_string(),
        })
        .collect();

    DashboardSkeleton {
        sensor_ids: sensors.iter().map(|s| s.id.clone()).collect(),
        charts,
    }
}
