// Application layer - Chart building use cases
pub mod chart_adapter;
pub mod dashboard_service;
pub mod downsample;
pub mod streaming_service;
