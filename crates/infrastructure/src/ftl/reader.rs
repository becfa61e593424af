use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use pihole_collector_domain::{DomainError, Query};
use std::io;
use tokio::net::tcp::OwnedReadHalf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder, FramedRead};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Longest line accepted from FTL, newline excluded.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// One newline-delimited frame of an FTL response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FtlLine {
    /// Line text with the trailing `\r` removed. Invalid UTF-8 is replaced
    /// with U+FFFD rather than rejected.
    Text(String),
    /// The line ran past the length limit and was discarded up to its newline.
    Oversized,
}

/// Splits the response stream on `\n` without ever failing on content.
#[derive(Debug, Clone)]
pub struct FtlLineCodec {
    inner: AnyDelimiterCodec,
}

impl FtlLineCodec {
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            inner: AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), Vec::new(), max_length),
        }
    }

    fn frame_line(
        decoded: Result<Option<Bytes>, AnyDelimiterCodecError>,
    ) -> Result<Option<FtlLine>, io::Error> {
        match decoded {
            Ok(Some(chunk)) => {
                let text = String::from_utf8_lossy(&chunk);
                Ok(Some(FtlLine::Text(text.trim_end_matches('\r').to_string())))
            }
            Ok(None) => Ok(None),
            Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => Ok(Some(FtlLine::Oversized)),
            Err(AnyDelimiterCodecError::Io(e)) => Err(e),
        }
    }
}

impl Default for FtlLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FtlLineCodec {
    type Item = FtlLine;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<FtlLine>, io::Error> {
        Self::frame_line(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<FtlLine>, io::Error> {
        Self::frame_line(self.inner.decode_eof(buf))
    }
}

/// Spawn the task that turns FTL's response stream into [`Query`] records.
///
/// Records go out on `tx` in wire order. Lines that fail to parse, overlong
/// lines included, are logged and skipped. The task finishes when the peer
/// closes the stream, when `cancel` fires, or when the receiving side is
/// dropped; a read error is returned through the join handle.
pub fn spawn_line_consumer(
    reader: OwnedReadHalf,
    tx: mpsc::Sender<Query>,
    cancel: CancellationToken,
) -> JoinHandle<io::Result<()>> {
    tokio::spawn(async move {
        let mut frames = FramedRead::new(reader, FtlLineCodec::new());
        let mut skipped = 0usize;

        loop {
            let frame = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                frame = frames.next() => frame,
            };

            let line = match frame {
                None => break,
                Some(Err(e)) => {
                    debug!(skipped, "FTL line consumer stopped on read error");
                    return Err(e);
                }
                Some(Ok(FtlLine::Oversized)) => {
                    skipped += 1;
                    warn!(max_length = MAX_LINE_LENGTH, "Skipping oversized FTL line");
                    continue;
                }
                Some(Ok(FtlLine::Text(line))) => line,
            };

            if line.is_empty() {
                continue;
            }

            let query = match Query::parse_line(&line) {
                Ok(query) => query,
                Err(e) => {
                    skipped += 1;
                    warn!(
                        error = %DomainError::from(e),
                        line = %line,
                        "Skipping malformed FTL query line"
                    );
                    continue;
                }
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sent = tx.send(query) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }

        debug!(skipped, "FTL line consumer finished");
        Ok(())
    })
}
