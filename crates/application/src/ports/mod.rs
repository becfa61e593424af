mod metrics_sink;
mod query_source;

pub use metrics_sink::QueryMetricsSink;
pub use query_source::QuerySource;
