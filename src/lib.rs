//! # routerlite
//!
//! **routerlite** is a small, regex-backed HTTP route resolver. It compiles
//! human-written route templates such as `/users/{id}` or `/users/{id:\d+}`
//! into anchored path matchers, keeps an insertion-ordered table of routes,
//! and resolves an incoming `(method, path)` pair to a registered handler
//! chain — distinguishing "no path matched" (404) from "path matched but
//! method not supported" (405, with an `Allow` set).
//!
//! ## Architecture
//!
//! The library is organized into a handful of focused modules:
//!
//! - **[`pattern`]** - Template normalization and compilation into anchored
//!   regex matchers with named capture tokens
//! - **[`route`]** - The immutable `Route` value (template + method map) and
//!   the insertion-ordered `RouteTable`
//! - **[`dispatcher`]** - The `Router` resolution state machine: base-path
//!   stripping, HEAD→GET fallback, table scan, allow-set computation, and
//!   handler chain execution
//! - **[`middleware`]** - The before/after middleware seam and built-ins
//! - **[`sink`]** - The response sink contract used to render 404/405
//!
//! Registration builds the route table through the pattern compiler;
//! resolution reads the table and calls out to opaque handler callables and
//! to the response sink. The table is built during a registration phase and
//! is read-only while serving; the two phases are not meant to interleave.
//!
//! ## Template language
//!
//! - Literal segments: `/health`
//! - Untyped tokens: `/users/{id}` — `{id}` matches one or more
//!   non-separator characters
//! - Typed tokens: `/users/{id:\d+}` — the expression after the colon is
//!   spliced into the matcher verbatim
//! - Raw escape hatch: a template starting with `^` is treated as an
//!   already-anchored regex and bypasses the mini-language entirely
//!
//! Malformed token syntax is not validated; a template that fails to compile
//! degrades to a literal matcher over its own text.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use routerlite::{Resolution, Router};
//!
//! let mut router = Router::new();
//! router.get("/users/{id}", Arc::new(|args: &[String]| {
//!     println!("user {}", args[0]);
//! }));
//!
//! let outcome = router.resolve("GET", "/users/42");
//! assert_eq!(outcome, Resolution::Handled { aborted: false });
//!
//! let outcome = router.resolve("DELETE", "/users/42");
//! assert!(matches!(outcome, Resolution::MethodNotAllowed(_)));
//! ```

pub mod dispatcher;
pub mod middleware;
pub mod pattern;
pub mod route;
pub mod sink;

pub use dispatcher::{AllowSet, Handler, Resolution, ResolveError, Router};
pub use middleware::{Flow, Middleware, TracingMiddleware};
pub use pattern::{normalize, CaptureVec, CompiledPattern, MAX_INLINE_CAPTURES};
pub use route::{HandlerChain, Route, RouteTable};
pub use sink::ResponseSink;
