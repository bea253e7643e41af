use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of captured variables before heap allocation.
/// Most REST-style templates have ≤4 tokens (e.g. `/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Stack-allocated storage for captured variables on the match hot path.
pub type CaptureVec = SmallVec<[String; MAX_INLINE_CAPTURES]>;

// Typed tokens `{name:expr}` are scanned before untyped tokens `{name}`.
// The untyped scanner requires a bare `{name}` with no colon, so it can
// never re-enter text produced by a typed substitution.
static TYPED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*):(.+?)\}").expect("token scanner regex")
});
static UNTYPED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("token scanner regex"));

/// Normalize a route template.
///
/// The empty template becomes `/`; any non-root template has trailing
/// separators stripped. Stripping can never yield the empty string, so
/// `normalize(normalize(t)) == normalize(t)` for all inputs.
#[must_use]
pub fn normalize(pattern: &str) -> String {
    if pattern.is_empty() {
        return "/".to_string();
    }
    if pattern != "/" && pattern.ends_with('/') {
        let stripped = pattern.trim_end_matches('/');
        if stripped.is_empty() {
            return "/".to_string();
        }
        return stripped.to_string();
    }
    pattern.to_string()
}

/// An anchored path matcher compiled from a route template, plus the named
/// capture tokens in the order the compiler recorded them.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    matcher: Regex,
    tokens: Vec<Arc<str>>,
    raw: bool,
}

impl CompiledPattern {
    /// Compile a raw template into an anchored matcher.
    ///
    /// Token names must match `[a-zA-Z_][a-zA-Z0-9_]*`. Typed tokens are
    /// substituted first, then untyped tokens on the already-substituted
    /// string; the token list therefore records typed names before untyped
    /// ones, each group in appearance order. Capture extraction follows the
    /// same order.
    #[must_use]
    pub fn compile(raw_pattern: &str) -> Self {
        let template = normalize(raw_pattern);

        // A start-anchored template bypasses the token mini-language and is
        // used verbatim with zero tokens.
        if template.starts_with('^') {
            let matcher = match Regex::new(&template) {
                Ok(re) => re,
                Err(err) => {
                    debug!(
                        template = %template,
                        error = %err,
                        "raw pattern did not compile, degrading to literal matcher"
                    );
                    literal_matcher(&template)
                }
            };
            return Self {
                template,
                matcher,
                tokens: Vec::new(),
                raw: true,
            };
        }

        let mut tokens: Vec<Arc<str>> = Vec::new();

        // {name:expr} — the expression is spliced in verbatim.
        let substituted = TYPED_TOKEN.replace_all(&template, |caps: &Captures| {
            tokens.push(Arc::from(&caps[1]));
            format!("(?P<{}>{})", &caps[1], &caps[2])
        });

        // {name} — default: one or more non-separator characters.
        let substituted = UNTYPED_TOKEN.replace_all(&substituted, |caps: &Captures| {
            tokens.push(Arc::from(&caps[1]));
            format!("(?P<{}>[^/]+)", &caps[1])
        });

        let anchored = format!("^{substituted}$");
        let matcher = match Regex::new(&anchored) {
            Ok(re) => re,
            Err(err) => {
                // Malformed templates are never rejected at registration
                // time; they degrade to a literal matcher over the template
                // text. Documented known gap.
                debug!(
                    template = %template,
                    error = %err,
                    "template did not compile, degrading to literal matcher"
                );
                tokens.clear();
                literal_matcher(&template)
            }
        };

        Self {
            template,
            matcher,
            tokens,
            raw: false,
        }
    }

    /// The normalized template this matcher was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Named capture tokens in the order the compiler recorded them.
    #[must_use]
    pub fn tokens(&self) -> &[Arc<str>] {
        &self.tokens
    }

    /// Whether this matcher came through the raw-regex escape hatch.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Test whether the matcher accepts the whole path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Extract captured variables for a path, or `None` when the matcher
    /// rejects it.
    ///
    /// Named captures are extracted in token order; a matcher with no token
    /// list (the raw escape hatch) falls back to positional capture order.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<CaptureVec> {
        let caps = self.matcher.captures(path)?;
        let mut vars = CaptureVec::new();
        if self.tokens.is_empty() {
            for i in 1..caps.len() {
                if let Some(m) = caps.get(i) {
                    vars.push(m.as_str().to_string());
                }
            }
        } else {
            for name in &self.tokens {
                if let Some(m) = caps.name(name) {
                    vars.push(m.as_str().to_string());
                }
            }
        }
        Some(vars)
    }
}

/// Anchored matcher over the escaped template text. Escaped text always
/// compiles, so this is the terminal fallback for malformed templates.
#[allow(clippy::expect_used)]
fn literal_matcher(template: &str) -> Regex {
    Regex::new(&format!("^{}$", regex::escape(template))).expect("escaped literal always compiles")
}
