//! # Pattern Module
//!
//! Compiles route templates into anchored path matchers.
//!
//! A template goes through two phases:
//!
//! 1. **Normalization**: the empty template becomes `/`; any non-root
//!    template has trailing separators stripped. Normalization is idempotent
//!    and defines route identity in the table.
//!
//! 2. **Compilation**: typed tokens `{name:expr}` are replaced with named
//!    capture groups using `expr` verbatim, then untyped tokens `{name}` are
//!    replaced with a default non-separator capture. The result is wrapped
//!    in `^…$` so a matcher never partially matches a path.
//!
//! A template that already starts with `^` is treated as a raw, pre-anchored
//! regex: it is compiled verbatim with an empty token list, letting power
//! users bypass the mini-language entirely.
//!
//! Malformed token syntax is not validated. A substituted pattern that fails
//! to compile degrades to a literal matcher over the template text rather
//! than failing registration.

mod core;
#[cfg(test)]
mod tests;

pub use core::{normalize, CaptureVec, CompiledPattern, MAX_INLINE_CAPTURES};
