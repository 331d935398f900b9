//! Minimal HTTP/1.x request parsing.
//!
//! Just enough of the protocol for the user directory endpoints:
//! request line, headers, and an optional body delimited by the blank
//! line and bounded by `Content-Length`.

mod error;
mod method;
mod request;
mod tests;

// Re-export public items
pub use error::Error;
pub use method::Method;
pub use request::{parse_request, HttpRequest, HttpVersion};
