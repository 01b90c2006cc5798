// Dashboard service - Use case for building the air-quality dashboard
use crate::application::chart_adapter::SeriesChartAdapter;
use crate::domain::chart::AlignmentPolicy;
use crate::domain::dashboard::{MetricChart, SensorObservations};
use crate::domain::error::ChartResult;
use crate::domain::metric::MetricKind;
use crate::domain::telemetry::{DataPoint, SensorSeries};

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#EF4444", "#3B82F6", "#F59E0B", "#10B981", "#8B5CF6", "#F97316", "#EC4899", "#14B8A6",
];

#[derive(Debug, Clone)]
pub struct DashboardService {
    adapter: SeriesChartAdapter,
    palette: Vec<String>,
}

impl DashboardService {
    pub fn new(adapter: SeriesChartAdapter, palette: Vec<String>) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette
        };
        Self { adapter, palette }
    }

    /// Build one chart per metric. An empty `metrics` slice means every
    /// metric in the catalog.
    pub fn build_dashboard(
        &self,
        sensors: &[SensorObservations],
        metrics: &[MetricKind],
    ) -> ChartResult<Vec<MetricChart>> {
        let metrics = if metrics.is_empty() { &MetricKind::ALL[..] } else { metrics };

        metrics
            .iter()
            .map(|metric| self.build_metric_chart(sensors, *metric))
            .collect()
    }

    /// Chart a single metric across every sensor. Stations report on their
    /// own schedule, so series are lined up on the union of their timestamps.
    pub fn build_metric_chart(
        &self,
        sensors: &[SensorObservations],
        metric: MetricKind,
    ) -> ChartResult<MetricChart> {
        let series = self.sensor_series(sensors, metric);
        let chart = self
            .adapter
            .build_with(&series, metric.label(), AlignmentPolicy::Union)?;

        Ok(MetricChart::new(metric, chart))
    }

    /// Project each sensor's observations onto one metric. Observations
    /// without a reading for the metric are skipped.
    pub fn sensor_series(&self, sensors: &[SensorObservations], metric: MetricKind) -> Vec<SensorSeries> {
        sensors
            .iter()
            .enumerate()
            .map(|(idx, sensor)| {
                let points = sensor
                    .observations
                    .iter()
                    .filter_map(|o| o.value(metric).map(|v| DataPoint::new(o.date_observed, v)))
                    .collect();

                SensorSeries::new(
                    sensor.id.clone(),
                    sensor.name.clone(),
                    self.palette[idx % self.palette.len()].clone(),
                    points,
                )
            })
            .collect()
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new(SeriesChartAdapter::default(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::Observation;
    use crate::domain::error::ChartError;

    fn station(id: &str, readings: &[(f64, Option<f64>)]) -> SensorObservations {
        SensorObservations {
            id: id.to_string(),
            name: format!("Station {}", id),
            observations: readings
                .iter()
                .map(|&(t, pm25)| Observation {
                    date_observed: t,
                    pm25,
                    ..Observation::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_palette_wraps_by_sensor_index() {
        let service = DashboardService::new(SeriesChartAdapter::default(), vec!["#111111".into(), "#222222".into()]);
        let sensors = vec![station("a", &[]), station("b", &[]), station("c", &[])];

        let series = service.sensor_series(&sensors, MetricKind::Pm25);

        let colors: Vec<&str> = series.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["#111111", "#222222", "#111111"]);
    }

    #[test]
    fn test_null_readings_are_skipped() {
        let sensors = vec![station("a", &[(0.0, Some(1.0)), (60_000.0, None), (120_000.0, Some(3.0))])];

        let series = DashboardService::default().sensor_series(&sensors, MetricKind::Pm25);

        assert_eq!(
            series[0].data_points,
            vec![DataPoint::new(0.0, 1.0), DataPoint::new(120_000.0, 3.0)]
        );
    }

    #[test]
    fn test_metric_chart_aligns_on_union_timeline() {
        let sensors = vec![
            station("a", &[(0.0, Some(1.0)), (120_000.0, Some(3.0))]),
            station("b", &[(60_000.0, Some(5.0))]),
        ];

        let chart = DashboardService::default()
            .build_metric_chart(&sensors, MetricKind::Pm25)
            .unwrap();

        assert_eq!(chart.title, "PM2.5 concentration");
        assert_eq!(chart.unit, "µg/m³");
        assert_eq!(chart.chart.category_labels, vec!["00:00", "00:01", "00:02"]);
        assert_eq!(chart.chart.series[1].values, vec![None, Some(5.0), None]);
        assert_eq!(chart.chart.series[0].fill_color, "#ef444433");
    }

    #[test]
    fn test_empty_metric_list_builds_full_catalog() {
        let charts = DashboardService::default()
            .build_dashboard(&[station("a", &[(0.0, Some(1.0))])], &[])
            .unwrap();

        let metrics: Vec<MetricKind> = charts.iter().map(|c| c.metric).collect();
        assert_eq!(metrics, MetricKind::ALL.to_vec());
    }

    #[test]
    fn test_invalid_timestamp_propagates() {
        let sensors = vec![station("a", &[(-1.0, Some(1.0))])];

        let err = DashboardService::default()
            .build_dashboard(&sensors, &[MetricKind::Pm25])
            .unwrap_err();

        assert!(matches!(err, ChartError::InvalidTimestamp { .. }));
    }
}
