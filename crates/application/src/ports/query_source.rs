use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pihole_collector_domain::{DomainError, Query};

/// Something that can report every query FTL saw in `[since, now)`.
///
/// Partial results are not errors: an implementation returns whatever it
/// managed to read and only fails when nothing could be fetched at all.
#[async_trait]
pub trait QuerySource: Send + Sync {
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<Query>, DomainError>;
}
