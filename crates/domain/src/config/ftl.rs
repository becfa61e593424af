use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Location of the FTL telnet API (usually port 4711 on the Pi-hole host).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FtlConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// How long a poll waits for the next line before treating the
    /// response as finished.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl FtlConfig {
    /// `host:port` string handed to the connector.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    4711
}

fn default_idle_timeout_ms() -> u64 {
    3000
}

fn default_connect_timeout_ms() -> u64 {
    5000
}

impl Default for FtlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            idle_timeout_ms: default_idle_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
