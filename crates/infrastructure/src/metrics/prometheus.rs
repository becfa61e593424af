use pihole_collector_application::ports::QueryMetricsSink;
use pihole_collector_application::use_cases::metrics::{
    GaugeLabels, HistogramLabels, GAUGE_LABEL_NAMES, HISTOGRAM_LABEL_NAMES,
};
use pihole_collector_domain::DomainError;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, HistogramOpts, HistogramVec, Opts, Registry};
use tracing::debug;

pub const DURATION_HISTOGRAM_NAME: &str = "pihole_query_duration_ms_buckets";
pub const DURATION_GAUGE_NAME: &str = "pihole_query_duration_ms";

/// Upper bounds, in milliseconds, of the duration histogram buckets.
pub const DURATION_BUCKETS_MS: [f64; 9] = [1.0, 3.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 1000.0];

/// Query duration metrics backed by the `prometheus` crate.
///
/// Cloning is cheap and clones share the same series, so one clone can be
/// registered while another is handed to the collect use case.
#[derive(Clone)]
pub struct PrometheusQueryMetrics {
    histogram: HistogramVec,
    gauge: GaugeVec,
}

impl PrometheusQueryMetrics {
    pub fn new() -> Result<Self, DomainError> {
        let histogram = HistogramVec::new(
            HistogramOpts::new(DURATION_HISTOGRAM_NAME, "Histogram of DNS query duration.")
                .buckets(DURATION_BUCKETS_MS.to_vec()),
            &HISTOGRAM_LABEL_NAMES,
        )
        .map_err(|e| DomainError::Metrics(e.to_string()))?;

        let gauge = GaugeVec::new(
            Opts::new(
                DURATION_GAUGE_NAME,
                "DNS query duration, represented as a gauge.",
            ),
            &GAUGE_LABEL_NAMES,
        )
        .map_err(|e| DomainError::Metrics(e.to_string()))?;

        Ok(Self { histogram, gauge })
    }

    /// Register both families into `registry`.
    pub fn register(&self, registry: &Registry) -> Result<(), DomainError> {
        registry
            .register(Box::new(self.clone()))
            .map_err(|e| DomainError::Metrics(e.to_string()))
    }
}

impl Collector for PrometheusQueryMetrics {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.histogram.desc();
        descs.extend(self.gauge.desc());
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = self.histogram.collect();
        families.extend(self.gauge.collect());
        families
    }
}

impl QueryMetricsSink for PrometheusQueryMetrics {
    fn describe(&self) -> Vec<String> {
        self.desc().iter().map(|desc| desc.fq_name.clone()).collect()
    }

    fn observe_duration(&self, labels: &HistogramLabels, delay_ms: f64) {
        self.histogram
            .with_label_values(&labels.values())
            .observe(delay_ms);
    }

    fn publish_latest(&self, samples: &[(GaugeLabels, f64)]) {
        self.gauge.reset();
        for (labels, delay_ms) in samples {
            self.gauge.with_label_values(&labels.values()).set(*delay_ms);
        }
        debug!(series = samples.len(), "Published query duration gauge");
    }
}
