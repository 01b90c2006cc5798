// Sensor telemetry domain models
use serde::{Deserialize, Serialize};

/// One reading. `x` is milliseconds since the epoch, `y` the measured value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSeries {
    pub sensor_id: String,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
}

impl SensorSeries {
    pub fn new(
        sensor_id: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
        data_points: Vec<DataPoint>,
    ) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            label: label.into(),
            color: color.into(),
            data_points,
        }
    }
}

/// A data point whose timestamp has already been validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// Validate a raw epoch-millisecond timestamp.
///
/// Non-finite and negative values are rejected, as are values chrono cannot
/// represent as an instant. Fractional milliseconds are floored.
pub fn timestamp_millis(raw: f64) -> Option<i64> {
    if !raw.is_finite() || raw < 0.0 || raw >= i64::MAX as f64 {
        return None;
    }
    let ms = raw.floor() as i64;
    chrono::DateTime::from_timestamp_millis(ms).map(|_| ms)
}
