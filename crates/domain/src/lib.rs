//! Pi-hole collector domain layer
pub mod config;
pub mod errors;
pub mod query;
pub mod query_status;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::{DomainError, QueryParseError};
pub use query::{Query, QUERY_LINE_FIELDS};
pub use query_status::{ReplyType, StatusType};
