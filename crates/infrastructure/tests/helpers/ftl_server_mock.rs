#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

pub const BLOCKED_AAAA_LINE: &str =
    "1734952435 AAAA cc-api-data.adobe.io 192.168.1.14 1 0 4 0 N/A -1 N/A#0 \"\"";
pub const FORWARDED_A_LINE: &str =
    "1734952436 A example.com 192.168.1.20 2 0 4 153 N/A -1 1.1.1.1#53 \"\"";
pub const CACHED_HTTPS_LINE: &str =
    "1734952437 HTTPS example.org 192.168.1.21 3 0 1 2 N/A -1 N/A#0 \"\"";

/// When the mock closes its side after answering a query command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hangup {
    /// Close right after the last response line, like a finished stream.
    AfterResponse,
    /// Keep the connection open until the client sends `>quit`.
    OnQuit,
    /// Abort the connection with a TCP reset after the last response line.
    Reset,
}

/// In-process stand-in for FTL's query API on 127.0.0.1.
pub struct MockFtlServer {
    addr: SocketAddr,
    commands: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockFtlServer {
    pub async fn start(lines: Vec<String>, hangup: Hangup) -> Result<Self, std::io::Error> {
        Self::start_with_line_delay(lines, hangup, Duration::ZERO).await
    }

    /// Like [`start`](Self::start) but with raw line bytes, which need not
    /// be UTF-8. A newline is appended to each.
    pub async fn start_raw(lines: Vec<Vec<u8>>, hangup: Hangup) -> Result<Self, std::io::Error> {
        Self::listen(lines, hangup, Duration::ZERO).await
    }

    /// Like [`start`](Self::start) but pauses `line_delay` before each line.
    pub async fn start_with_line_delay(
        lines: Vec<String>,
        hangup: Hangup,
        line_delay: Duration,
    ) -> Result<Self, std::io::Error> {
        let raw = lines.into_iter().map(String::into_bytes).collect();
        Self::listen(raw, hangup, line_delay).await
    }

    async fn listen(
        lines: Vec<Vec<u8>>,
        hangup: Hangup,
        line_delay: Duration,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let commands = Arc::new(Mutex::new(Vec::new()));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let recorded = commands.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            tokio::spawn(Self::serve(
                                stream,
                                lines.clone(),
                                hangup,
                                line_delay,
                                recorded.clone(),
                            ));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            commands,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn serve(
        stream: TcpStream,
        lines: Vec<Vec<u8>>,
        hangup: Hangup,
        line_delay: Duration,
        commands: Arc<Mutex<Vec<String>>>,
    ) {
        if hangup == Hangup::Reset {
            let _ = stream.set_linger(Some(Duration::ZERO));
        }
        let (reader, mut writer) = stream.into_split();
        let mut incoming = BufReader::new(reader).lines();

        while let Ok(Some(command)) = incoming.next_line().await {
            commands.lock().unwrap().push(command.clone());

            if command == ">quit" {
                break;
            }

            if command.starts_with(">getallqueries-time ") {
                for line in &lines {
                    if !line_delay.is_zero() {
                        tokio::time::sleep(line_delay).await;
                    }
                    let mut framed = line.clone();
                    framed.push(b'\n');
                    if writer.write_all(&framed).await.is_err() {
                        return;
                    }
                }
                match hangup {
                    Hangup::AfterResponse => {
                        let _ = writer.shutdown().await;
                        return;
                    }
                    Hangup::Reset => {
                        // Let the lines reach the client before the reset.
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        writer.forget();
                        drop(incoming);
                        return;
                    }
                    Hangup::OnQuit => {}
                }
            }
        }

        let _ = writer.shutdown().await;
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn endpoint(&self) -> String {
        self.addr.to_string()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    /// Poll until `command` has been received or `within` elapses.
    pub async fn wait_for_command(&self, command: &str, within: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + within;
        loop {
            if self.commands().iter().any(|c| c == command) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockFtlServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| line.to_string()).collect()
}

/// An address nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}
