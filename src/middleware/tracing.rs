use tracing::info;

use super::{Flow, Middleware};

/// Middleware that logs every invocation with its captured variables and
/// never short-circuits. Useful as a before- or after-chain member when
/// debugging route registrations.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn call(&self, args: &[String]) -> Flow {
        info!(args = ?args, "handler chain step");
        Flow::Continue
    }
}
