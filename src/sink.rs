//! # Response Sink
//!
//! The only observable outputs of resolution besides handler invocation:
//! a status code, response headers (notably `Allow` for 405), and a default
//! body when no not-found handler is configured. The HTTP transport owns
//! the real response object; the dispatcher only calls into this contract.

/// Sink the dispatcher renders 404/405 outcomes into.
pub trait ResponseSink {
    /// Set the HTTP status code.
    fn set_status(&mut self, status: u16);

    /// Set a response header. The dispatcher uses this for `Allow`, with
    /// methods joined by `", "`.
    fn set_header(&mut self, name: &str, value: &str);

    /// Emit a default body.
    fn write_body(&mut self, body: &str);
}
