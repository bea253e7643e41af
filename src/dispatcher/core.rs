use http::{Method, Uri};
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::middleware::{Flow, Middleware};
use crate::pattern::normalize;
use crate::route::{HandlerChain, Route, RouteTable};
use crate::sink::ResponseSink;

/// Body emitted for 404 when no not-found handler is configured.
pub const DEFAULT_NOT_FOUND_BODY: &str = "Not Found";

/// Body emitted for 405.
pub const DEFAULT_METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

/// An opaque controller or not-found callable, invoked with the captured
/// path variables in token-declaration order.
pub trait Handler: Send + Sync {
    fn invoke(&self, args: &[String]);
}

impl<F> Handler for F
where
    F: Fn(&[String]) + Send + Sync,
{
    fn invoke(&self, args: &[String]) {
        self(args)
    }
}

/// Insertion-ordered, deduplicated set of HTTP methods.
///
/// Holds the union of methods registered on every route whose matcher
/// accepts a given path; rendered into the `Allow` header on 405.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowSet {
    methods: SmallVec<[Method; 8]>,
}

impl AllowSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a method unless already present.
    pub fn insert(&mut self, method: Method) {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }

    #[must_use]
    pub fn contains(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    /// Render as an `Allow` header value: methods joined by `", "`.
    #[must_use]
    pub fn join(&self) -> String {
        let mut out = String::new();
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(method.as_str());
        }
        out
    }
}

impl FromIterator<Method> for AllowSet {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        let mut set = Self::new();
        for method in iter {
            set.insert(method);
        }
        set
    }
}

/// Outcome of one resolution.
///
/// `Handled` covers both a completed chain and one aborted by a
/// before-middleware — both are designed results, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A handler chain ran. `aborted` is true when a before-middleware
    /// stopped it before the controller.
    Handled { aborted: bool },
    /// The path matched at least one route, but none carried the method.
    MethodNotAllowed(AllowSet),
    /// No route matcher accepted the path.
    NotFound,
}

impl Resolution {
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, Resolution::Handled { .. })
    }

    /// Bridge to a `Result` for callers preferring error kinds. `Ok` holds
    /// the `aborted` flag.
    pub fn into_result(self) -> Result<bool, ResolveError> {
        match self {
            Resolution::Handled { aborted } => Ok(aborted),
            Resolution::MethodNotAllowed(allow) => Err(ResolveError::MethodNotAllowed { allow }),
            Resolution::NotFound => Err(ResolveError::NotFound),
        }
    }
}

/// The two non-handled outcomes as named error kinds, distinguishable from
/// genuine defects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no route matched the request path")]
    NotFound,
    #[error("method not allowed; allowed methods: {}", .allow.join())]
    MethodNotAllowed { allow: AllowSet },
}

/// Router: a route table, a base-path prefix, and an optional not-found
/// handler. Built once during registration, read-mostly while serving.
pub struct Router {
    table: RouteTable,
    base_path: String,
    not_found: Option<Arc<dyn Handler>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
            base_path: String::new(),
            not_found: None,
        }
    }

    /// Set the prefix stripped from every incoming path, e.g. `/api/v1`.
    /// Normalized to a leading separator and no trailing one; the root
    /// prefix is stored as the empty string.
    pub fn set_base_path(&mut self, base_path: &str) {
        let trimmed = base_path.trim_matches('/');
        self.base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Handler invoked (with no arguments) on 404 instead of the default
    /// body.
    pub fn set_not_found(&mut self, handler: Arc<dyn Handler>) {
        self.not_found = Some(handler);
    }

    /// Register a full handler chain for `(method, pattern)`.
    pub fn bind(
        &mut self,
        method: Method,
        pattern: &str,
        controller: Arc<dyn Handler>,
        before: Vec<Arc<dyn Middleware>>,
        after: Vec<Arc<dyn Middleware>>,
    ) {
        self.table.register(
            method,
            pattern,
            HandlerChain {
                controller,
                before,
                after,
            },
        );
    }

    pub fn get(&mut self, pattern: &str, controller: Arc<dyn Handler>) {
        self.bind(Method::GET, pattern, controller, Vec::new(), Vec::new());
    }

    pub fn post(&mut self, pattern: &str, controller: Arc<dyn Handler>) {
        self.bind(Method::POST, pattern, controller, Vec::new(), Vec::new());
    }

    pub fn put(&mut self, pattern: &str, controller: Arc<dyn Handler>) {
        self.bind(Method::PUT, pattern, controller, Vec::new(), Vec::new());
    }

    pub fn delete(&mut self, pattern: &str, controller: Arc<dyn Handler>) {
        self.bind(Method::DELETE, pattern, controller, Vec::new(), Vec::new());
    }

    pub fn patch(&mut self, pattern: &str, controller: Arc<dyn Handler>) {
        self.bind(Method::PATCH, pattern, controller, Vec::new(), Vec::new());
    }

    pub fn head(&mut self, pattern: &str, controller: Arc<dyn Handler>) {
        self.bind(Method::HEAD, pattern, controller, Vec::new(), Vec::new());
    }

    pub fn options(&mut self, pattern: &str, controller: Arc<dyn Handler>) {
        self.bind(Method::OPTIONS, pattern, controller, Vec::new(), Vec::new());
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Iterate registered routes in insertion order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.table.iter()
    }

    /// Print all registered routes to stdout. Debugging aid.
    pub fn dump_routes(&self) {
        println!(
            "[routes] base_path={} count={}",
            self.base_path,
            self.table.len()
        );
        for route in self.table.iter() {
            let methods: Vec<&str> = route.allowed_methods().map(Method::as_str).collect();
            println!(
                "[route] {} {}{}",
                methods.join(","),
                self.base_path,
                route.template()
            );
        }
    }

    /// Union of methods registered on every route whose matcher accepts
    /// `path`, in first-seen order. Path-only: the check ignores methods.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> AllowSet {
        let path = normalize(path);
        let mut allow = AllowSet::new();
        for route in self.table.iter() {
            if route.pattern().matches(&path) {
                for method in route.allowed_methods() {
                    allow.insert(method.clone());
                }
            }
        }
        allow
    }

    /// Resolve `(method, uri)` against the table, invoking the matched
    /// handler chain when one exists.
    ///
    /// HEAD implicitly falls back to a GET handler. A method that is not
    /// even a valid HTTP token can never carry a handler and goes straight
    /// to the allow-set pass.
    pub fn resolve(&self, method: &str, uri: &str) -> Resolution {
        let path = self.request_path(uri);

        let candidates: SmallVec<[Method; 2]> =
            match Method::from_bytes(method.to_ascii_uppercase().as_bytes()) {
                Ok(m) if m == Method::HEAD => smallvec![Method::HEAD, Method::GET],
                Ok(m) => smallvec![m],
                Err(_) => SmallVec::new(),
            };

        for candidate in &candidates {
            debug!(method = %candidate, path = %path, "route match attempt");
            if let Some(resolution) = self.try_candidate(candidate, &path) {
                return resolution;
            }
        }

        let allow = self.allowed_methods(&path);
        if !allow.is_empty() {
            warn!(
                method = %method,
                path = %path,
                allow = %allow.join(),
                "path matched but method not allowed"
            );
            return Resolution::MethodNotAllowed(allow);
        }

        warn!(method = %method, path = %path, "no route matched");
        Resolution::NotFound
    }

    /// Resolve and render the non-handled outcomes into the sink: 405 sets
    /// the `Allow` header, status, and default body; 404 sets the status
    /// and invokes the not-found handler or emits the default body.
    pub fn run(&self, method: &str, uri: &str, sink: &mut dyn ResponseSink) -> Resolution {
        let resolution = self.resolve(method, uri);
        match &resolution {
            Resolution::Handled { .. } => {}
            Resolution::MethodNotAllowed(allow) => {
                sink.set_header("Allow", &allow.join());
                sink.set_status(405);
                sink.write_body(DEFAULT_METHOD_NOT_ALLOWED_BODY);
            }
            Resolution::NotFound => {
                sink.set_status(404);
                match &self.not_found {
                    Some(handler) => handler.invoke(&[]),
                    None => sink.write_body(DEFAULT_NOT_FOUND_BODY),
                }
            }
        }
        resolution
    }

    /// Extract the path component from `uri`, strip the base-path prefix,
    /// and normalize trailing separators.
    fn request_path(&self, uri: &str) -> String {
        let mut path = match uri.parse::<Uri>() {
            Ok(parsed) => parsed.path().to_string(),
            // Unparseable URIs keep whatever precedes the query/fragment.
            Err(_) => uri
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        if !self.base_path.is_empty() {
            if let Some(stripped) = path.strip_prefix(&self.base_path) {
                path = if stripped.is_empty() {
                    "/".to_string()
                } else {
                    stripped.to_string()
                };
            }
        }

        normalize(&path)
    }

    /// Scan the table in insertion order for one candidate method.
    ///
    /// Returns `None` when no route served the candidate — either nothing
    /// accepted the path, or routes that did lacked a chain for it.
    fn try_candidate(&self, method: &Method, path: &str) -> Option<Resolution> {
        let mut allow = AllowSet::new();

        for route in self.table.iter() {
            let Some(args) = route.pattern().captures(path) else {
                continue;
            };

            // Path accepted: record this route's methods. Several routes may
            // accept the same literal path with different method sets.
            for m in route.allowed_methods() {
                allow.insert(m.clone());
            }

            let Some(chain) = route.handler_for(method) else {
                // Wrong method here; a later route may still serve it.
                continue;
            };

            info!(
                method = %method,
                path = %path,
                template = %route.template(),
                args = ?args,
                "route matched"
            );
            return Some(run_chain(chain, &args));
        }

        if !allow.is_empty() {
            debug!(
                method = %method,
                path = %path,
                allow = %allow.join(),
                "path matched without a handler for this method"
            );
        }
        None
    }
}

/// Execute before-middleware, controller, and after-middleware for one
/// matched chain.
fn run_chain(chain: &HandlerChain, args: &[String]) -> Resolution {
    for mw in &chain.before {
        if mw.call(args) == Flow::Stop {
            debug!("before middleware stopped the chain");
            return Resolution::Handled { aborted: true };
        }
    }

    chain.controller.invoke(args);

    for mw in &chain.after {
        if mw.call(args) == Flow::Stop {
            break;
        }
    }

    Resolution::Handled { aborted: false }
}
