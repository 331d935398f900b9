//! A minimal user directory served over HTTP.
//!
//! The crate bundles a small HTTP/1.x layer (request parsing, a
//! tokio-based accept loop, pattern routing) with the service logic
//! on top: a JSON configuration file created on first run, an
//! in-memory append-only store of user records, and three endpoints
//! to read, create, and look up those records.
//!
//! # Features
//!
//! - Parse HTTP requests from byte slices, including bodies bounded
//!   by `Content-Length`
//! - Route by exact path or path prefix with per-route method
//!   allow-lists (unmatched methods get 405 with an `Allow` header)
//! - JSON request and response bodies via serde
//! - Configuration bootstrapping: a missing `config.json` is created
//!   with defaults; a malformed one is a fatal startup error
//! - Record store guarded by an async lock, so concurrent creates
//!   always assign unique identifiers
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use userdir_rs::parse_request;
//!
//! let raw = b"GET /users HTTP/1.1\r\nHost: localhost\r\n\r\n";
//! let request = parse_request(raw).unwrap();
//! assert_eq!(request.path, "/users");
//! ```
//!
//! ## Wiring up the service
//!
//! ```no_run
//! use std::sync::Arc;
//! use userdir_rs::{routes, AppState, Config, HttpServer, ServerConfig, UserStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::ensure_and_load("config.json")?;
//!
//! let state = Arc::new(AppState {
//!     config: config.clone(),
//!     store: UserStore::seeded(),
//! });
//!
//! let server = HttpServer::new(ServerConfig {
//!     addr: config.socket_addr()?,
//!     ..ServerConfig::default()
//! });
//! routes::register(&server, state).await;
//! server.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
pub mod store;

// Re-export commonly used items for convenience
pub use config::{Config, ConfigError, CONFIG_PATH};
pub use http::{parse_request, Error as ParseError, HttpRequest, HttpVersion, Method};
pub use routes::AppState;
pub use server::{
    Error as ServerError, HttpResponse, HttpServer, RoutePattern, ServerConfig, StatusCode,
};
pub use store::{NewUser, User, UserStore};
