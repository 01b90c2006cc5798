//! SmartCity sensor charts.
//!
//! Turns named, colored sensor time-series into renderer-agnostic line chart
//! specifications and serves them over HTTP.
//!
//! - [`domain`]: series, chart spec, colors, metric and building catalogs
//! - [`application`]: the series chart adapter and dashboard services
//! - [`infrastructure`]: configuration and wire encoding
//! - [`presentation`]: axum routes
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
