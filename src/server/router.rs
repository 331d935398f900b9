//! Route table and handler plumbing.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http::{HttpRequest, Method};
use crate::server::{Error, HttpResponse};

/// Type alias for a boxed future that resolves to a handler result.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function stored in the route table.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// How a route's path is matched against a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Match the request path exactly.
    Exact(String),
    /// Match any request path starting with the given prefix.
    Prefix(String),
}

impl RoutePattern {
    /// Check whether the pattern matches the given request path.
    ///
    /// The query string, if any, is ignored.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        match self {
            RoutePattern::Exact(p) => p == path,
            RoutePattern::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Exact(p) => write!(f, "{p}"),
            RoutePattern::Prefix(p) => write!(f, "{p}*"),
        }
    }
}

/// Represents a route in the HTTP server.
pub struct Route {
    /// The path pattern to match.
    pub pattern: RoutePattern,
    /// The HTTP methods the route accepts.
    pub methods: Vec<Method>,
    /// The handler function.
    pub handler: HandlerFn,
}
