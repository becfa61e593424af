pub mod prometheus;

pub use self::prometheus::{PrometheusQueryMetrics, DURATION_BUCKETS_MS};
