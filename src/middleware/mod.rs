//! # Middleware Module
//!
//! The before/after middleware seam of the handler chain.
//!
//! Middleware are opaque callables invoked with the same ordered captured
//! variables as the controller. A before-middleware returning [`Flow::Stop`]
//! aborts the chain without invoking the controller or the after-chain; an
//! after-middleware returning [`Flow::Stop`] simply ends the after-chain.

mod core;
mod tracing;

pub use core::{Flow, Middleware};
pub use tracing::TracingMiddleware;
