pub mod client;
pub mod connection;
pub mod reader;

pub use client::FtlQueryClient;
pub use connection::{FtlCommand, FtlConnection};
