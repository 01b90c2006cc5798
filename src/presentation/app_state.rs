// Application state for HTTP handlers
use crate::application::chart_adapter::SeriesChartAdapter;
use crate::application::dashboard_service::DashboardService;
use crate::application::streaming_service::StreamingDashboardService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub chart_adapter: SeriesChartAdapter,
    pub dashboard_service: Arc<DashboardService>,
    pub streaming_service: StreamingDashboardService,
}

impl AppState {
    pub fn new(chart_adapter: SeriesChartAdapter, palette: Vec<String>) -> Self {
        let dashboard_service = Arc::new(DashboardService::new(chart_adapter.clone(), palette));
        let streaming_service = StreamingDashboardService::new(dashboard_service.clone());
        Self {
            chart_adapter,
            dashboard_service,
            streaming_service,
        }
    }
}
