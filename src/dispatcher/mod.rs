//! # Dispatcher Module
//!
//! The resolution state machine that turns `(method, uri)` into one of:
//! handler invocation, Method-Not-Allowed with an `Allow` set, or Not-Found.
//!
//! ## Resolution steps
//!
//! 1. Uppercase the method and extract the path component from the URI;
//!    strip the configured base-path prefix (defaulting to `/` when
//!    stripping empties the path) and any non-root trailing separator.
//! 2. Build the candidate method list: `[method]`, or `[HEAD, GET]` when
//!    the incoming method is HEAD (suppressing the HEAD response body is
//!    the transport's responsibility, not handled here).
//! 3. Per candidate, scan the table in insertion order. A route whose
//!    matcher accepts the path but has no chain for the candidate is
//!    skipped — a later route may accept the same path and carry the
//!    method. The first route with a chain wins: captured variables are
//!    extracted in token order and the before/controller/after chain runs.
//! 4. If no candidate reached a chain, a path-only pass over the whole
//!    table computes the allow-set. Non-empty means 405, empty means 404.
//!
//! Both middleware-aborted and completed chains count as "handled" — they
//! are designed control results, not errors. Failures inside controllers or
//! middleware are opaque to the core and propagate unmodified.
//!
//! Nothing here is asynchronous: matching is pure, one regex evaluation per
//! candidate route, O(number of routes) per attempt. The router is built
//! during a registration phase and treated as read-only while serving.

mod core;

pub use core::{
    AllowSet, Handler, Resolution, ResolveError, Router, DEFAULT_METHOD_NOT_ALLOWED_BODY,
    DEFAULT_NOT_FOUND_BODY,
};
