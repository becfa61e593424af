pub mod ftl;
pub mod metrics;
