mod ftl_server_mock;

pub use ftl_server_mock::*;
