pub mod collect;
pub mod labels;

pub use collect::{CollectOutcome, CollectQueryMetricsUseCase};
pub use labels::{GaugeLabels, HistogramLabels, GAUGE_LABEL_NAMES, HISTOGRAM_LABEL_NAMES};
