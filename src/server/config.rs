//! Server configuration.

use std::net::SocketAddr;

/// Transport-level HTTP server configuration.
///
/// This is distinct from the service's persisted [`Config`]: the
/// persisted file decides the port, this struct carries the resolved
/// bind address plus the transport tunables.
///
/// [`Config`]: crate::config::Config
#[derive(Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".parse().unwrap(),
            max_connections: 1024,
            read_buffer_size: 8192,
        }
    }
}
