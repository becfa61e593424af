use super::labels::{GaugeLabels, HistogramLabels};
use crate::ports::{QueryMetricsSink, QuerySource};
use chrono::{DateTime, Utc};
use pihole_collector_domain::DomainError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Summary of one successful collection cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectOutcome {
    pub queries: usize,
    pub allowed_queries: usize,
    pub blocked_queries: usize,
    pub histogram_observations: usize,
    pub gauge_series: usize,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Use case: poll FTL for the queries seen since the previous cycle and
/// fold them into the duration histogram and gauge.
///
/// Run once per scrape. The window start is advanced to the time the cycle
/// began, so a query that lands while the fetch is running shows up again
/// next cycle instead of being lost.
pub struct CollectQueryMetricsUseCase {
    source: Arc<dyn QuerySource>,
    sink: Arc<dyn QueryMetricsSink>,
    last_collected: Mutex<DateTime<Utc>>,
}

impl CollectQueryMetricsUseCase {
    pub fn new(source: Arc<dyn QuerySource>, sink: Arc<dyn QueryMetricsSink>) -> Self {
        Self::starting_at(source, sink, Utc::now())
    }

    /// Same as [`new`](Self::new) with an explicit first window start.
    pub fn starting_at(
        source: Arc<dyn QuerySource>,
        sink: Arc<dyn QueryMetricsSink>,
        since: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            sink,
            last_collected: Mutex::new(since),
        }
    }

    pub fn describe(&self) -> Vec<String> {
        self.sink.describe()
    }

    pub async fn last_collected(&self) -> DateTime<Utc> {
        *self.last_collected.lock().await
    }

    pub async fn execute(&self) -> Result<CollectOutcome, DomainError> {
        // Held for the whole cycle: overlapping scrapes queue up here.
        let mut last_collected = self.last_collected.lock().await;

        let collection_time = Utc::now();
        let window_start = *last_collected;

        debug!(since = %window_start, "Collecting FTL queries");

        let queries = match self.source.fetch_since(window_start).await {
            Ok(queries) => queries,
            Err(e) => {
                error!(error = %e, since = %window_start, "Failed to collect FTL queries");
                return Err(e);
            }
        };

        let mut latest: HashMap<GaugeLabels, f64> = HashMap::with_capacity(queries.len());
        for query in &queries {
            self.sink
                .observe_duration(&HistogramLabels::from_query(query), query.delay_ms);
            latest.insert(GaugeLabels::from_query(query), query.delay_ms);
        }

        let samples: Vec<(GaugeLabels, f64)> = latest.into_iter().collect();
        self.sink.publish_latest(&samples);

        *last_collected = collection_time;

        let outcome = CollectOutcome {
            queries: queries.len(),
            allowed_queries: queries.iter().filter(|q| q.status.is_allowed()).count(),
            blocked_queries: queries.iter().filter(|q| q.is_blocked()).count(),
            histogram_observations: queries.len(),
            gauge_series: samples.len(),
            window_start,
            window_end: collection_time,
        };

        info!(
            queries = outcome.queries,
            allowed = outcome.allowed_queries,
            blocked = outcome.blocked_queries,
            gauge_series = outcome.gauge_series,
            "FTL query metrics collected"
        );

        Ok(outcome)
    }
}
