//! Configuration for the collector
//!
//! - `root`: main configuration, file lookup and CLI overrides
//! - `ftl`: where and how to reach the FTL query API
//! - `server`: HTTP exposition bind address and port
//! - `logging`: log level
//! - `errors`: configuration errors

pub mod errors;
pub mod ftl;
pub mod logging;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use ftl::FtlConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
