// Domain layer - Pure data models, no I/O
pub mod building;
pub mod chart;
pub mod color;
pub mod dashboard;
pub mod error;
pub mod metric;
pub mod telemetry;
pub mod stream;
