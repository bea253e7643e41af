use http::Method;
use std::sync::Arc;
use tracing::{debug, info};

use crate::dispatcher::Handler;
use crate::middleware::Middleware;
use crate::pattern::{normalize, CompiledPattern};

/// The handler chain registered for one (route, method) pair: an ordered
/// before-middleware list, one controller, an ordered after-middleware list.
#[derive(Clone)]
pub struct HandlerChain {
    pub controller: Arc<dyn Handler>,
    pub before: Vec<Arc<dyn Middleware>>,
    pub after: Vec<Arc<dyn Middleware>>,
}

impl HandlerChain {
    /// Chain with no middleware.
    #[must_use]
    pub fn new(controller: Arc<dyn Handler>) -> Self {
        Self {
            controller,
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

/// One registered route: a compiled pattern plus a method → handler-chain
/// map preserving first-registration order.
#[derive(Clone)]
pub struct Route {
    pattern: CompiledPattern,
    handlers: Vec<(Method, HandlerChain)>,
}

impl Route {
    fn new(pattern: CompiledPattern) -> Self {
        Self {
            pattern,
            handlers: Vec::new(),
        }
    }

    /// The normalized template, e.g. `/users/{id:\d+}`.
    #[must_use]
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Methods registered on this route, in first-registration order.
    pub fn allowed_methods(&self) -> impl Iterator<Item = &Method> {
        self.handlers.iter().map(|(m, _)| m)
    }

    /// The handler chain for a method, if one is registered.
    #[must_use]
    pub fn handler_for(&self, method: &Method) -> Option<&HandlerChain> {
        self.handlers
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, chain)| chain)
    }

    /// Produce a new route value with `chain` registered for `method`.
    ///
    /// Re-registering a method replaces its chain in place; other methods
    /// are untouched.
    #[must_use]
    pub fn with_handler(&self, method: Method, chain: HandlerChain) -> Route {
        let mut updated = self.clone();
        if let Some(slot) = updated.handlers.iter_mut().find(|(m, _)| *m == method) {
            slot.1 = chain;
        } else {
            updated.handlers.push((method, chain));
        }
        updated
    }
}

/// Insertion-ordered collection of routes, keyed by normalized template.
///
/// Invariant: no two entries share the same normalized template.
#[derive(Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a handler chain for `(method, raw_pattern)`.
    ///
    /// The pattern is compiled to obtain its normalized template. An
    /// existing route with that template is replaced by an updated value
    /// with the new method merged in; otherwise a new route is appended,
    /// preserving insertion order.
    pub fn register(&mut self, method: Method, raw_pattern: &str, chain: HandlerChain) {
        let pattern = CompiledPattern::compile(raw_pattern);

        if let Some(idx) = self
            .routes
            .iter()
            .position(|r| r.template() == pattern.template())
        {
            debug!(
                method = %method,
                template = %pattern.template(),
                "merging method into existing route"
            );
            let updated = self.routes[idx].with_handler(method, chain);
            self.routes[idx] = updated;
            return;
        }

        info!(
            method = %method,
            template = %pattern.template(),
            routes_count = self.routes.len() + 1,
            "route registered"
        );
        self.routes.push(Route::new(pattern).with_handler(method, chain));
    }

    /// Look up a route by template; the input is normalized first.
    #[must_use]
    pub fn get(&self, template: &str) -> Option<&Route> {
        let template = normalize(template);
        self.routes.iter().find(|r| r.template() == template)
    }

    /// Iterate routes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
