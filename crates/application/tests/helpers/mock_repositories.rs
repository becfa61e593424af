#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pihole_collector_application::ports::{QueryMetricsSink, QuerySource};
use pihole_collector_application::use_cases::metrics::{GaugeLabels, HistogramLabels};
use pihole_collector_domain::{DomainError, Query};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub struct MockQuerySource {
    queries: Arc<Mutex<Vec<Query>>>,
    requested: Arc<Mutex<Vec<DateTime<Utc>>>>,
    should_fail: Arc<Mutex<bool>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockQuerySource {
    pub fn new() -> Self {
        Self {
            queries: Arc::new(Mutex::new(Vec::new())),
            requested: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            delay: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_lines(&self, lines: &[&str]) {
        let parsed = lines
            .iter()
            .map(|line| Query::parse_line(line).unwrap())
            .collect();
        *self.queries.lock().unwrap() = parsed;
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Every `since` passed to `fetch_since`, oldest first.
    pub fn requested_since(&self) -> Vec<DateTime<Utc>> {
        self.requested.lock().unwrap().clone()
    }
}

impl Default for MockQuerySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuerySource for MockQuerySource {
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<Query>, DomainError> {
        self.requested.lock().unwrap().push(since);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::ConnectFailed {
                endpoint: "localhost:4711".to_string(),
                reason: "connection refused".to_string(),
            });
        }

        Ok(self.queries.lock().unwrap().clone())
    }
}

#[derive(Clone, Default)]
pub struct MockMetricsSink {
    observations: Arc<Mutex<Vec<(HistogramLabels, f64)>>>,
    published: Arc<Mutex<Vec<Vec<(GaugeLabels, f64)>>>>,
}

impl MockMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> Vec<(HistogramLabels, f64)> {
        self.observations.lock().unwrap().clone()
    }

    /// One entry per `publish_latest` call.
    pub fn published(&self) -> Vec<Vec<(GaugeLabels, f64)>> {
        self.published.lock().unwrap().clone()
    }
}

impl QueryMetricsSink for MockMetricsSink {
    fn describe(&self) -> Vec<String> {
        vec![
            "pihole_query_duration_ms_buckets".to_string(),
            "pihole_query_duration_ms".to_string(),
        ]
    }

    fn observe_duration(&self, labels: &HistogramLabels, delay_ms: f64) {
        self.observations
            .lock()
            .unwrap()
            .push((labels.clone(), delay_ms));
    }

    fn publish_latest(&self, samples: &[(GaugeLabels, f64)]) {
        self.published.lock().unwrap().push(samples.to_vec());
    }
}
