mod metrics;

pub use metrics::MetricsServices;
