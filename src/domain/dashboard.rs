// Air-quality dashboard domain model
use super::chart::ChartSpec;
use super::metric::MetricKind;
use serde::{Deserialize, Serialize};

/// One multi-pollutant observation from a station. Readings the station did
/// not report are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub date_observed: f64,
    #[serde(default)]
    pub pm25: Option<f64>,
    #[serde(default)]
    pub pm1: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub co2: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl Observation {
    pub fn value(&self, metric: MetricKind) -> Option<f64> {
        match metric {
            MetricKind::Pm25 => self.pm25,
            MetricKind::Pm1 => self.pm1,
            MetricKind::Pm10 => self.pm10,
            MetricKind::O3 => self.o3,
            MetricKind::Co2 => self.co2,
            MetricKind::Temperature => self.temperature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorObservations {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

/// One chart of the dashboard: a single metric across every sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricChart {
    pub metric: MetricKind,
    pub title: String,
    pub unit: String,
    pub chart: ChartSpec,
}

impl MetricChart {
    pub fn new(metric: MetricKind, chart: ChartSpec) -> Self {
        Self {
            metric,
            title: metric.title().to_string(),
            unit: metric.unit().to_string(),
            chart,
        }
    }
}
