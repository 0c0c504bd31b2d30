mod mock_upstream_server;

pub use mock_upstream_server::*;
