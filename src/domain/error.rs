// Chart build errors
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// A data point's timestamp is not a usable instant.
    #[error("invalid timestamp {timestamp} at index {index} of sensor '{sensor_id}'")]
    InvalidTimestamp {
        sensor_id: String,
        index: usize,
        timestamp: f64,
    },

    /// The series color cannot be parsed, so no fill color can be derived.
    #[error("invalid color '{color}' for sensor '{sensor_id}'")]
    InvalidColor { sensor_id: String, color: String },
}

impl ChartError {
    pub fn sensor_id(&self) -> &str {
        match self {
            ChartError::InvalidTimestamp { sensor_id, .. } => sensor_id,
            ChartError::InvalidColor { sensor_id, .. } => sensor_id,
        }
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
