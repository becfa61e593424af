use crate::use_cases::metrics::{GaugeLabels, HistogramLabels};

/// Destination for the samples produced by one collection cycle.
pub trait QueryMetricsSink: Send + Sync {
    /// Names of the metric families this sink can produce.
    fn describe(&self) -> Vec<String>;

    /// Add one observation to the cumulative duration histogram.
    fn observe_duration(&self, labels: &HistogramLabels, delay_ms: f64);

    /// Replace the previous cycle's gauge series with `samples`.
    fn publish_latest(&self, samples: &[(GaugeLabels, f64)]);
}
