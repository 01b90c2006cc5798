// Series chart adapter - Turns sensor series into an aligned chart spec
use crate::application::downsample::{average_buckets, bucket_size, downsample_points};
use crate::domain::chart::{AlignmentPolicy, ChartSeries, ChartSpec, LabelFormat};
use crate::domain::color::Color;
use crate::domain::error::{ChartError, ChartResult};
use crate::domain::telemetry::{timestamp_millis, DataPoint, SensorSeries, TimeSeriesPoint};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub alignment: AlignmentPolicy,
    pub label_format: LabelFormat,
    /// Offset labels are rendered at. Pinned so output never depends on the
    /// host's locale or timezone.
    pub utc_offset: FixedOffset,
    pub max_points: Option<usize>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            alignment: AlignmentPolicy::Positional,
            label_format: LabelFormat::HourMinute,
            utc_offset: Utc.fix(),
            max_points: None,
        }
    }
}

/// A series after validation: parsed color, checked timestamps.
struct PreparedSeries<'a> {
    source: &'a SensorSeries,
    fill_color: String,
    points: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct SeriesChartAdapter {
    options: ChartOptions,
}

impl SeriesChartAdapter {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Build a chart spec from `sensors`, titled `metric_label`.
    ///
    /// Fails on the first timestamp or color that cannot be used; no partial
    /// spec is returned.
    pub fn build(&self, sensors: &[SensorSeries], metric_label: &str) -> ChartResult<ChartSpec> {
        self.build_with(sensors, metric_label, self.options.alignment)
    }

    /// Same as [`build`](Self::build) with a per-call alignment override.
    pub fn build_with(
        &self,
        sensors: &[SensorSeries],
        metric_label: &str,
        alignment: AlignmentPolicy,
    ) -> ChartResult<ChartSpec> {
        if sensors.is_empty() {
            return Ok(ChartSpec::empty(metric_label));
        }

        let mut prepared = sensors
            .iter()
            .map(|s| self.prepare(s))
            .collect::<ChartResult<Vec<_>>>()?;

        if let Some(max_points) = self.options.max_points {
            downsample(&mut prepared, max_points, alignment);
        }

        let spec = match alignment {
            AlignmentPolicy::Positional => self.align_positional(metric_label, &prepared)?,
            AlignmentPolicy::Union => self.align_union(metric_label, &prepared)?,
        };

        tracing::debug!(
            "Built chart '{}': {} series, {} categories ({:?})",
            metric_label,
            spec.series.len(),
            spec.category_labels.len(),
            alignment
        );

        Ok(spec)
    }

    /// Single-series chart for a live feed: points are sorted by time and
    /// labelled down to the second.
    ///
    /// Timestamps are checked before sorting, so an error's index refers to
    /// the caller's `data_points`.
    pub fn realtime(
        &self,
        sensor_id: &str,
        label: &str,
        color: &str,
        data_points: &[DataPoint],
    ) -> ChartResult<ChartSpec> {
        if let Some((index, p)) = data_points
            .iter()
            .enumerate()
            .find(|(_, p)| timestamp_millis(p.x).is_none())
        {
            return Err(ChartError::InvalidTimestamp {
                sensor_id: sensor_id.to_string(),
                index,
                timestamp: p.x,
            });
        }

        let mut sorted = data_points.to_vec();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

        let adapter = SeriesChartAdapter::new(ChartOptions {
            alignment: AlignmentPolicy::Positional,
            label_format: LabelFormat::HourMinuteSecond,
            ..self.options
        });
        let series = SensorSeries::new(sensor_id, label, color, sorted);
        adapter.build(std::slice::from_ref(&series), label)
    }

    fn prepare<'a>(&self, source: &'a SensorSeries) -> ChartResult<PreparedSeries<'a>> {
        let points = source
            .data_points
            .iter()
            .enumerate()
            .map(|(index, p)| {
                timestamp_millis(p.x)
                    .map(|ms| TimeSeriesPoint::new(ms, p.y))
                    .ok_or_else(|| ChartError::InvalidTimestamp {
                        sensor_id: source.sensor_id.clone(),
                        index,
                        timestamp: p.x,
                    })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let fill_color = source
            .color
            .parse::<Color>()
            .map_err(|_| ChartError::InvalidColor {
                sensor_id: source.sensor_id.clone(),
                color: source.color.clone(),
            })?
            .fill()
            .to_css();

        Ok(PreparedSeries {
            source,
            fill_color,
            points,
        })
    }

    fn align_positional(&self, title: &str, prepared: &[PreparedSeries<'_>]) -> ChartResult<ChartSpec> {
        let Some(reference) = prepared.first() else {
            return Ok(ChartSpec::empty(title));
        };
        let width = reference.points.len();

        let category_labels = reference
            .points
            .iter()
            .enumerate()
            .map(|(index, p)| self.label_for(p.time_ms, reference.source, index))
            .collect::<ChartResult<Vec<_>>>()?;

        let series = prepared
            .iter()
            .map(|s| {
                let mut values: Vec<Option<f64>> =
                    s.points.iter().take(width).map(|p| Some(p.value)).collect();
                values.resize(width, None);
                chart_series(s, values)
            })
            .collect();

        Ok(ChartSpec {
            title: title.to_string(),
            category_labels,
            series,
        })
    }

    fn align_union(&self, title: &str, prepared: &[PreparedSeries<'_>]) -> ChartResult<ChartSpec> {
        let timeline: BTreeSet<i64> = prepared
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.time_ms))
            .collect();

        let mut category_labels = Vec::with_capacity(timeline.len());
        for time_ms in &timeline {
            let label = format_label(*time_ms, &self.options)
                .ok_or_else(|| self.locate_invalid(prepared, *time_ms))?;
            category_labels.push(label);
        }

        let series = prepared
            .iter()
            .map(|s| {
                let mut by_time: HashMap<i64, f64> = HashMap::with_capacity(s.points.len());
                for p in &s.points {
                    by_time.entry(p.time_ms).or_insert(p.value);
                }
                let values = timeline.iter().map(|t| by_time.get(t).copied()).collect();
                chart_series(s, values)
            })
            .collect();

        Ok(ChartSpec {
            title: title.to_string(),
            category_labels,
            series,
        })
    }

    fn label_for(&self, time_ms: i64, source: &SensorSeries, index: usize) -> ChartResult<String> {
        format_label(time_ms, &self.options).ok_or_else(|| ChartError::InvalidTimestamp {
            sensor_id: source.sensor_id.clone(),
            index,
            timestamp: time_ms as f64,
        })
    }

    fn locate_invalid(&self, prepared: &[PreparedSeries<'_>], time_ms: i64) -> ChartError {
        let (sensor_id, index) = prepared
            .iter()
            .find_map(|s| {
                s.points
                    .iter()
                    .position(|p| p.time_ms == time_ms)
                    .map(|i| (s.source.sensor_id.clone(), i))
            })
            .unwrap_or_default();

        ChartError::InvalidTimestamp {
            sensor_id,
            index,
            timestamp: time_ms as f64,
        }
    }
}

fn downsample(prepared: &mut [PreparedSeries<'_>], max_points: usize, alignment: AlignmentPolicy) {
    match alignment {
        // Every series is bucketed with the reference series' bucket size so
        // position i covers the same input positions in all of them.
        AlignmentPolicy::Positional => {
            let Some(size) = prepared
                .first()
                .and_then(|reference| bucket_size(reference.points.len(), max_points))
            else {
                return;
            };
            for s in prepared.iter_mut() {
                s.points = average_buckets(&s.points, size);
            }
        }
        AlignmentPolicy::Union => {
            for s in prepared.iter_mut() {
                s.points = downsample_points(std::mem::take(&mut s.points), max_points);
            }
        }
    }
}

fn chart_series(prepared: &PreparedSeries<'_>, values: Vec<Option<f64>>) -> ChartSeries {
    ChartSeries {
        label: prepared.source.label.clone(),
        color: prepared.source.color.clone(),
        fill_color: prepared.fill_color.clone(),
        values,
    }
}

/// Format an epoch-millisecond instant as a 24-hour, zero-padded label at the
/// configured offset.
pub fn format_label(time_ms: i64, options: &ChartOptions) -> Option<String> {
    let instant = DateTime::from_timestamp_millis(time_ms)?;
    Some(
        instant
            .with_timezone(&options.utc_offset)
            .format(options.label_format.pattern())
            .to_string(),
    )
}

struct MemoEntry {
    sensors: Vec<SensorSeries>,
    metric_label: String,
    spec: ChartSpec,
}

impl MemoEntry {
    fn matches(&self, sensors: &[SensorSeries], metric_label: &str) -> bool {
        self.metric_label == metric_label && self.sensors.as_slice() == sensors
    }
}

/// Caches the last input and its chart so unchanged input is not rebuilt.
#[derive(Default)]
pub struct MemoizedChartAdapter {
    adapter: SeriesChartAdapter,
    last: Option<MemoEntry>,
    builds: u64,
}

impl MemoizedChartAdapter {
    pub fn new(adapter: SeriesChartAdapter) -> Self {
        Self {
            adapter,
            last: None,
            builds: 0,
        }
    }

    /// A failed build leaves the previous entry cached.
    pub fn chart(&mut self, sensors: &[SensorSeries], metric_label: &str) -> ChartResult<&ChartSpec> {
        if matches!(&self.last, Some(entry) if entry.matches(sensors, metric_label)) {
            return Ok(&self.last.as_ref().expect("cache hit checked above").spec);
        }
        let spec = self.adapter.build(sensors, metric_label)?;
        self.builds += 1;
        let entry = self.last.insert(MemoEntry {
            sensors: sensors.to_vec(),
            metric_label: metric_label.to_string(),
            spec,
        });
        Ok(&entry.spec)
    }

    /// Number of times the underlying adapter actually ran.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(id: &str, color: &str, points: &[(f64, f64)]) -> SensorSeries {
        SensorSeries::new(
            id,
            format!("{}-label", id),
            color,
            points.iter().map(|&(x, y)| DataPoint::new(x, y)).collect(),
        )
    }

    #[test]
    fn test_empty_input_yields_empty_spec() {
        let spec = SeriesChartAdapter::default().build(&[], "PM2.5").unwrap();
        assert!(spec.category_labels.is_empty());
        assert!(spec.series.is_empty());
        assert_eq!(spec.title, "PM2.5");
    }

    #[test]
    fn test_single_series_example() {
        let sensors = vec![SensorSeries::new(
            "A",
            "PM2.5-A",
            "#ff0000",
            vec![DataPoint::new(0.0, 10.0), DataPoint::new(60_000.0, 12.0)],
        )];

        let spec = SeriesChartAdapter::default().build(&sensors, "PM2.5").unwrap();

        assert_eq!(spec.category_labels, vec!["00:00", "00:01"]);
        assert_eq!(
            spec.series,
            vec![ChartSeries {
                label: "PM2.5-A".to_string(),
                color: "#ff0000".to_string(),
                fill_color: "#ff000033".to_string(),
                values: vec![Some(10.0), Some(12.0)],
            }]
        );
    }

    #[test]
    fn test_shorter_series_is_padded_with_missing() {
        let sensors = vec![
            series("A", "#ff0000", &[(0.0, 1.0), (60_000.0, 2.0), (120_000.0, 3.0)]),
            series("B", "#00ff00", &[(0.0, 7.0)]),
        ];

        let spec = SeriesChartAdapter::default().build(&sensors, "m").unwrap();

        assert_eq!(spec.category_labels.len(), 3);
        assert_eq!(spec.series[1].values, vec![Some(7.0), None, None]);
    }

    #[test]
    fn test_longer_series_is_truncated() {
        let sensors = vec![
            series("A", "#ff0000", &[(0.0, 1.0)]),
            series("B", "#00ff00", &[(0.0, 7.0), (60_000.0, 8.0), (120_000.0, 9.0)]),
        ];

        let spec = SeriesChartAdapter::default().build(&sensors, "m").unwrap();

        assert_eq!(spec.category_labels, vec!["00:00"]);
        assert_eq!(spec.series[1].values, vec![Some(7.0)]);
    }

    #[test]
    fn test_every_series_matches_label_count() {
        let sensors = vec![
            series("A", "#ff0000", &[(0.0, 1.0), (60_000.0, 2.0)]),
            series("B", "blue", &[]),
            series("C", "rgb(1, 2, 3)", &[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]),
        ];

        let spec = SeriesChartAdapter::default().build(&sensors, "m").unwrap();

        assert_eq!(spec.category_labels.len(), sensors[0].data_points.len());
        for s in &spec.series {
            assert_eq!(s.values.len(), spec.category_labels.len());
        }
    }

    #[test]
    fn test_nan_timestamp_fails_with_location() {
        let sensors = vec![
            series("A", "#ff0000", &[(0.0, 1.0)]),
            series("B", "#00ff00", &[(0.0, 1.0), (f64::NAN, 2.0)]),
        ];

        let err = SeriesChartAdapter::default().build(&sensors, "m").unwrap_err();

        match err {
            ChartError::InvalidTimestamp { sensor_id, index, timestamp } => {
                assert_eq!(sensor_id, "B");
                assert_eq!(index, 1);
                assert!(timestamp.is_nan());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_timestamp_fails() {
        let sensors = vec![series("A", "#ff0000", &[(-5.0, 1.0)])];
        let err = SeriesChartAdapter::default().build(&sensors, "m").unwrap_err();
        assert!(matches!(err, ChartError::InvalidTimestamp { index: 0, .. }));
    }

    #[test]
    fn test_unparseable_color_fails() {
        let sensors = vec![series("A", "not-a-color", &[(0.0, 1.0)])];
        let err = SeriesChartAdapter::default().build(&sensors, "m").unwrap_err();
        assert_eq!(
            err,
            ChartError::InvalidColor {
                sensor_id: "A".to_string(),
                color: "not-a-color".to_string()
            }
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let sensors = vec![
            series("A", "#ff0000", &[(0.0, 1.0), (60_000.0, 2.0)]),
            series("B", "#00ff00", &[(0.0, 3.0)]),
        ];
        let adapter = SeriesChartAdapter::default();
        assert_eq!(adapter.build(&sensors, "m").unwrap(), adapter.build(&sensors, "m").unwrap());
    }

    #[test]
    fn test_labels_use_configured_offset() {
        let adapter = SeriesChartAdapter::new(ChartOptions {
            utc_offset: FixedOffset::east_opt(7 * 3600).unwrap(),
            ..ChartOptions::default()
        });
        let sensors = vec![series("A", "#ff0000", &[(0.0, 1.0), (17.5 * 3_600_000.0, 2.0)])];

        let spec = adapter.build(&sensors, "m").unwrap();

        assert_eq!(spec.category_labels, vec!["07:00", "00:30"]);
    }

    #[test]
    fn test_union_alignment_matches_by_timestamp() {
        let sensors = vec![
            series("A", "#ff0000", &[(0.0, 1.0), (120_000.0, 3.0)]),
            series("B", "#00ff00", &[(60_000.0, 5.0), (120_000.0, 6.0)]),
        ];

        let spec = SeriesChartAdapter::default()
            .build_with(&sensors, "m", AlignmentPolicy::Union)
            .unwrap();

        assert_eq!(spec.category_labels, vec!["00:00", "00:01", "00:02"]);
        assert_eq!(spec.series[0].values, vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(spec.series[1].values, vec![None, Some(5.0), Some(6.0)]);
    }

    #[test]
    fn test_downsampling_caps_categories() {
        let adapter = SeriesChartAdapter::new(ChartOptions {
            max_points: Some(2),
            ..ChartOptions::default()
        });
        let sensors = vec![series("A", "#ff0000", &[(0.0, 1.0), (60_000.0, 3.0), (120_000.0, 5.0), (180_000.0, 7.0)])];

        let spec = adapter.build(&sensors, "m").unwrap();

        assert_eq!(spec.category_labels, vec!["00:01", "00:03"]);
        assert_eq!(spec.series[0].values, vec![Some(2.0), Some(6.0)]);
    }

    #[test]
    fn test_realtime_sorts_and_labels_seconds() {
        let points = vec![DataPoint::new(61_000.0, 2.0), DataPoint::new(1_000.0, 1.0)];

        let spec = SeriesChartAdapter::default()
            .realtime("rt-1", "PM2.5", "rgb(255, 99, 132)", &points)
            .unwrap();

        assert_eq!(spec.category_labels, vec!["00:00:01", "00:01:01"]);
        assert_eq!(spec.series[0].values, vec![Some(1.0), Some(2.0)]);
        assert_eq!(spec.series[0].fill_color, "rgba(255, 99, 132, 0.2)");
    }

    #[test]
    fn test_realtime_error_reports_input_index() {
        let points = vec![
            DataPoint::new(1_000.0, 1.0),
            DataPoint::new(f64::NAN, 2.0),
            DataPoint::new(500.0, 3.0),
        ];

        let err = SeriesChartAdapter::default()
            .realtime("rt-1", "PM", "#ff0000", &points)
            .unwrap_err();

        match err {
            ChartError::InvalidTimestamp { sensor_id, index, timestamp } => {
                assert_eq!(sensor_id, "rt-1");
                assert_eq!(index, 1);
                assert!(timestamp.is_nan());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_positional_downsampling_keeps_series_in_step() {
        let adapter = SeriesChartAdapter::new(ChartOptions {
            max_points: Some(150),
            ..ChartOptions::default()
        });
        let minutes = |n: usize| -> Vec<(f64, f64)> {
            (0..n).map(|i| (i as f64 * 60_000.0, i as f64)).collect()
        };
        let sensors = vec![
            series("A", "#ff0000", &minutes(151)),
            series("B", "#00ff00", &minutes(149)),
        ];

        let spec = adapter.build(&sensors, "m").unwrap();

        assert_eq!(spec.category_labels.len(), 76);
        assert_eq!(spec.category_labels[1], "00:03");
        assert_eq!(spec.series[0].values[1], Some(2.5));
        assert_eq!(spec.series[1].values[1], Some(2.5));
        // Full buckets cover the same minutes in both series
        assert_eq!(spec.series[0].values[..74], spec.series[1].values[..74]);
        assert_eq!(spec.series[1].values[75], None);
        for s in &spec.series {
            assert_eq!(s.values.len(), spec.category_labels.len());
        }
    }

    #[test]
    fn test_positional_downsampling_buckets_longer_series_too() {
        let adapter = SeriesChartAdapter::new(ChartOptions {
            max_points: Some(2),
            ..ChartOptions::default()
        });
        let sensors = vec![
            series("A", "#ff0000", &[(0.0, 1.0), (60_000.0, 3.0), (120_000.0, 5.0), (180_000.0, 7.0)]),
            series("B", "#00ff00", &[(0.0, 2.0), (60_000.0, 4.0), (120_000.0, 6.0), (180_000.0, 8.0), (240_000.0, 10.0)]),
        ];

        let spec = adapter.build(&sensors, "m").unwrap();

        assert_eq!(spec.category_labels, vec!["00:01", "00:03"]);
        assert_eq!(spec.series[1].values, vec![Some(3.0), Some(7.0)]);
    }

    #[test]
    fn test_memoized_adapter_keeps_entry_after_failure() {
        let mut memo = MemoizedChartAdapter::default();
        let good = vec![series("A", "#ff0000", &[(0.0, 1.0)])];
        let bad = vec![series("A", "#ff0000", &[(f64::NAN, 1.0)])];

        memo.chart(&good, "m").unwrap();
        assert!(memo.chart(&bad, "m").is_err());
        memo.chart(&good, "m").unwrap();

        assert_eq!(memo.builds(), 1);
    }

    #[test]
    fn test_memoized_adapter_skips_unchanged_input() {
        let mut memo = MemoizedChartAdapter::default();
        let sensors = vec![series("A", "#ff0000", &[(0.0, 1.0)])];

        let first = memo.chart(&sensors, "m").unwrap().clone();
        let second = memo.chart(&sensors, "m").unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(memo.builds(), 1);

        let changed = vec![series("A", "#ff0000", &[(0.0, 2.0)])];
        memo.chart(&changed, "m").unwrap();
        assert_eq!(memo.builds(), 2);

        memo.chart(&changed, "other").unwrap();
        assert_eq!(memo.builds(), 3);
    }
}
