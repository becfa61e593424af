use pihole_collector_domain::DomainError;
use std::fmt;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

/// Commands understood by FTL's line-oriented query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtlCommand {
    /// Every query with `from <= timestamp <= until` (unix seconds).
    GetAllQueriesTime { from: i64, until: i64 },
    Quit,
}

impl FtlCommand {
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FtlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetAllQueriesTime { from, until } => {
                writeln!(f, ">getallqueries-time {} {}", from, until)
            }
            Self::Quit => writeln!(f, ">quit"),
        }
    }
}

/// One TCP session with FTL.
///
/// The read half is handed off to a consumer task with [`take_reader`];
/// commands keep going out through the write half held here.
///
/// [`take_reader`]: FtlConnection::take_reader
pub struct FtlConnection {
    endpoint: String,
    reader: Option<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl FtlConnection {
    pub async fn open(endpoint: &str, connect_timeout: Duration) -> Result<Self, DomainError> {
        let stream = tokio::time::timeout(connect_timeout, TcpStream::connect(endpoint))
            .await
            .map_err(|_| DomainError::ConnectFailed {
                endpoint: endpoint.to_string(),
                reason: format!("timed out after {:?}", connect_timeout),
            })?
            .map_err(|e| DomainError::ConnectFailed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        if let Err(e) = stream.set_nodelay(true) {
            debug!(endpoint = %endpoint, error = %e, "Failed to set TCP_NODELAY");
        }

        let (reader, writer) = stream.into_split();
        debug!(endpoint = %endpoint, "FTL connection opened");

        Ok(Self {
            endpoint: endpoint.to_string(),
            reader: Some(reader),
            writer,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&mut self, command: &FtlCommand) -> Result<(), DomainError> {
        let wire = command.to_wire();
        self.writer
            .write_all(wire.as_bytes())
            .await
            .map_err(|e| DomainError::CommandWrite(format!("{}: {}", self.endpoint, e)))?;

        debug!(endpoint = %self.endpoint, command = %wire.trim_end(), "FTL command sent");
        Ok(())
    }

    /// Returns `None` once the read half has been taken.
    pub fn take_reader(&mut self) -> Option<OwnedReadHalf> {
        self.reader.take()
    }

    /// Say goodbye and shut the write half down. Failures only get logged:
    /// the peer may already be gone.
    pub async fn close(mut self) {
        if let Err(e) = self.send(&FtlCommand::Quit).await {
            debug!(endpoint = %self.endpoint, error = %e, "Failed to send quit to FTL");
        }
        if let Err(e) = self.writer.shutdown().await {
            debug!(endpoint = %self.endpoint, error = %e, "Failed to shut down FTL connection");
        }
        debug!(endpoint = %self.endpoint, "FTL connection closed");
    }
}
