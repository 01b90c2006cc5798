// Air-quality metric catalog
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Pm25,
    Pm1,
    Pm10,
    O3,
    Co2,
    Temperature,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Pm25,
        MetricKind::Pm1,
        MetricKind::Pm10,
        MetricKind::O3,
        MetricKind::Co2,
        MetricKind::Temperature,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MetricKind::Pm25 => "pm25",
            MetricKind::Pm1 => "pm1",
            MetricKind::Pm10 => "pm10",
            MetricKind::O3 => "o3",
            MetricKind::Co2 => "co2",
            MetricKind::Temperature => "temperature",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Pm25 => "PM2.5",
            MetricKind::Pm1 => "PM1.0",
            MetricKind::Pm10 => "PM10",
            MetricKind::O3 => "O3",
            MetricKind::Co2 => "CO2",
            MetricKind::Temperature => "Temperature",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::Pm25 => "PM2.5 concentration",
            MetricKind::Pm1 => "PM1 concentration",
            MetricKind::Pm10 => "PM10 concentration",
            MetricKind::O3 => "Ozone (O3) concentration",
            MetricKind::Co2 => "CO2 concentration",
            MetricKind::Temperature => "Temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Pm25 | MetricKind::Pm1 | MetricKind::Pm10 => "µg/m³",
            MetricKind::O3 => "ppb",
            MetricKind::Co2 => "ppm",
            MetricKind::Temperature => "°C",
        }
    }
}

/// Catalog entry as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MetricDetails {
    pub metric: MetricKind,
    pub label: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
}

impl From<MetricKind> for MetricDetails {
    fn from(metric: MetricKind) -> Self {
        Self {
            metric,
            label: metric.label(),
            title: metric.title(),
            unit: metric.unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches_serde_name() {
        for metric in MetricKind::ALL {
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", metric.key()));
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(MetricKind::Pm25.unit(), "µg/m³");
        assert_eq!(MetricKind::O3.unit(), "ppb");
        assert_eq!(MetricKind::Co2.unit(), "ppm");
    }
}
