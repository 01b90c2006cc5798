// Renderer-agnostic chart specification
use serde::{Deserialize, Serialize};

/// A line chart ready for a category-axis renderer.
///
/// Every `series[i].values` has exactly `category_labels.len()` entries;
/// `None` marks a position the series has no reading for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub category_labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category_labels: Vec::new(),
            series: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_labels.is_empty() && self.series.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub fill_color: String,
    pub values: Vec<Option<f64>>,
}

/// Which series supplies the x-axis and how the others line up with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentPolicy {
    /// Labels come from the first series; the others are matched by index,
    /// padded with missing values or truncated to its length.
    #[default]
    Positional,
    /// Labels are the sorted union of every timestamp; values are matched
    /// by exact timestamp.
    Union,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    #[default]
    HourMinute,
    HourMinuteSecond,
}

impl LabelFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            LabelFormat::HourMinute => "%H:%M",
            LabelFormat::HourMinuteSecond => "%H:%M:%S",
        }
    }
}
