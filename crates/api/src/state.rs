use pihole_collector_application::use_cases::CollectQueryMetricsUseCase;
use prometheus::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub collect_metrics: Arc<CollectQueryMetricsUseCase>,
    pub registry: Arc<Registry>,
}
