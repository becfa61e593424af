use super::connection::{FtlCommand, FtlConnection};
use super::reader::spawn_line_consumer;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pihole_collector_application::ports::QuerySource;
use pihole_collector_domain::{DomainError, Query};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const RECORD_CHANNEL_CAPACITY: usize = 1024;

/// How a fetch stopped waiting for more records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchEnd {
    /// FTL closed the stream (or it failed).
    Completed,
    /// Nothing arrived within the idle timeout.
    Stalled,
}

/// Pulls query history out of FTL, one connection per fetch.
///
/// FTL never marks the end of a `>getallqueries-time` response, so a fetch
/// ends either when the peer closes the stream or when no line has arrived
/// for `idle_timeout`.
pub struct FtlQueryClient {
    endpoint: String,
    idle_timeout: Duration,
    connect_timeout: Duration,
}

impl FtlQueryClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }
}

#[async_trait]
impl QuerySource for FtlQueryClient {
    async fn fetch_since(&self, since: DateTime<Utc>) -> Result<Vec<Query>, DomainError> {
        let mut connection = FtlConnection::open(&self.endpoint, self.connect_timeout).await?;

        let reader = connection.take_reader().ok_or_else(|| {
            DomainError::StreamRead(format!("{}: read half already taken", self.endpoint))
        })?;

        let (tx, mut rx) = mpsc::channel(RECORD_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let mut worker = spawn_line_consumer(reader, tx, cancel.clone());

        let from = since.timestamp();
        let until = Utc::now().timestamp();
        let command = FtlCommand::GetAllQueriesTime { from, until };

        if let Err(e) = connection.send(&command).await {
            connection.close().await;
            cancel.cancel();
            let _ = worker.await;
            return Err(e);
        }

        let mut queries = Vec::new();

        let end = loop {
            tokio::select! {
                biased;
                Some(query) = rx.recv() => queries.push(query),
                joined = &mut worker => {
                    match joined {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => {
                            warn!(endpoint = %self.endpoint, error = %e, "FTL stream read failed");
                        }
                        Err(e) => {
                            warn!(endpoint = %self.endpoint, error = %e, "FTL line consumer aborted");
                        }
                    }
                    break FetchEnd::Completed;
                }
                _ = tokio::time::sleep(self.idle_timeout) => break FetchEnd::Stalled,
            }
        };

        connection.close().await;

        if end == FetchEnd::Stalled {
            debug!(
                endpoint = %self.endpoint,
                idle_timeout = ?self.idle_timeout,
                "No FTL data within idle timeout, ending fetch"
            );
            cancel.cancel();
            if let Ok(Err(e)) = worker.await {
                warn!(endpoint = %self.endpoint, error = %e, "FTL stream read failed");
            }
        }

        while let Ok(query) = rx.try_recv() {
            queries.push(query);
        }

        debug!(
            endpoint = %self.endpoint,
            from,
            until,
            records = queries.len(),
            "FTL fetch finished"
        );

        Ok(queries)
    }
}

