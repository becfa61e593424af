pub mod metrics;

pub use metrics::{CollectOutcome, CollectQueryMetricsUseCase};
