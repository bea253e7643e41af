//! # Route Module
//!
//! The immutable `Route` value and the insertion-ordered `RouteTable`.
//!
//! A `Route` pairs one compiled pattern with a method → handler-chain map.
//! Updating the map produces a new `Route` value rather than mutating in
//! place, so the table can hand out references to concurrent readers once
//! the registration phase is over.
//!
//! The table is keyed by normalized template: registering the same template
//! again merges methods into the existing entry instead of appending a
//! duplicate, and scan order — insertion order — decides precedence when
//! several matchers accept the same path.

mod core;

pub use core::{HandlerChain, Route, RouteTable};
