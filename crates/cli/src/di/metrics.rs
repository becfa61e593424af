use pihole_collector_api::AppState;
use pihole_collector_application::ports::{QueryMetricsSink, QuerySource};
use pihole_collector_application::use_cases::CollectQueryMetricsUseCase;
use pihole_collector_domain::Config;
use pihole_collector_infrastructure::ftl::FtlQueryClient;
use pihole_collector_infrastructure::metrics::PrometheusQueryMetrics;
use prometheus::Registry;
use std::sync::Arc;
use tracing::info;

pub struct MetricsServices {
    pub registry: Arc<Registry>,
    pub collect_metrics: Arc<CollectQueryMetricsUseCase>,
}

impl MetricsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = Registry::new();
        let sink = PrometheusQueryMetrics::new()?;
        sink.register(&registry)?;

        let source = FtlQueryClient::new(config.ftl.endpoint())
            .with_idle_timeout(config.ftl.idle_timeout())
            .with_connect_timeout(config.ftl.connect_timeout());

        let collect_metrics = Arc::new(CollectQueryMetricsUseCase::new(
            Arc::new(source) as Arc<dyn QuerySource>,
            Arc::new(sink) as Arc<dyn QueryMetricsSink>,
        ));

        info!(
            families = ?collect_metrics.describe(),
            ftl_endpoint = %config.ftl.endpoint(),
            "Query metrics registered"
        );

        Ok(Self {
            registry: Arc::new(registry),
            collect_metrics,
        })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            collect_metrics: self.collect_metrics.clone(),
            registry: self.registry.clone(),
        }
    }
}
