//! Async HTTP server with pattern-based routing.
//!
//! The server accepts connections on a tokio `TcpListener`, parses
//! each request with the `http` module, and dispatches it to the
//! first route whose pattern and method allow-list match.

mod config;
mod error;
mod http_server;
mod response;
mod router;

// Re-export public items
pub use config::ServerConfig;
pub use error::Error;
pub use http_server::HttpServer;
pub use response::{HttpResponse, StatusCode};
pub use router::{HandlerFn, HandlerFuture, Route, RoutePattern};
