use super::{normalize, CompiledPattern};

#[test]
fn test_normalize_empty_is_root() {
    assert_eq!(normalize(""), "/");
}

#[test]
fn test_normalize_strips_trailing_separator() {
    assert_eq!(normalize("/users/"), "/users");
    assert_eq!(normalize("/users//"), "/users");
    assert_eq!(normalize("/"), "/");
}

#[test]
fn test_normalize_is_idempotent() {
    for t in ["", "/", "/users/", "///", "/users/{id}/", "/a/b"] {
        let once = normalize(t);
        assert_eq!(normalize(&once), once, "not idempotent for {t:?}");
    }
}

#[test]
fn test_default_token() {
    let p = CompiledPattern::compile("/users/{id}");
    assert_eq!(p.template(), "/users/{id}");
    assert_eq!(p.tokens().len(), 1);
    assert_eq!(p.tokens()[0].as_ref(), "id");
    assert!(!p.is_raw());
    assert!(p.matches("/users/1"));
    assert!(!p.matches("/users/"));
    assert!(!p.matches("/users/1/extra"));

    let vars = p.captures("/users/1").unwrap();
    assert_eq!(vars.as_slice(), ["1"]);
}

#[test]
fn test_typed_token() {
    let p = CompiledPattern::compile(r"/users/{id:\d+}");
    assert!(p.matches("/users/42"));
    assert!(!p.matches("/users/abc"));
    let vars = p.captures("/users/42").unwrap();
    assert_eq!(vars.as_slice(), ["42"]);
}

#[test]
fn test_mixed_tokens_record_typed_first() {
    // Typed tokens are substituted in a first pass, so they precede untyped
    // ones in the token list and in the extracted argument order.
    let p = CompiledPattern::compile(r"/files/{name}/{rev:\d+}");
    let tokens: Vec<&str> = p.tokens().iter().map(|t| t.as_ref()).collect();
    assert_eq!(tokens, ["rev", "name"]);
    let vars = p.captures("/files/readme/7").unwrap();
    assert_eq!(vars.as_slice(), ["7", "readme"]);
}

#[test]
fn test_multiple_tokens_in_order() {
    let p = CompiledPattern::compile("/orgs/{org}/repos/{repo}");
    let tokens: Vec<&str> = p.tokens().iter().map(|t| t.as_ref()).collect();
    assert_eq!(tokens, ["org", "repo"]);
    let vars = p.captures("/orgs/acme/repos/widget").unwrap();
    assert_eq!(vars.as_slice(), ["acme", "widget"]);
}

#[test]
fn test_raw_pattern_escape_hatch() {
    let p = CompiledPattern::compile(r"^/reports/(\d{4})/(\d{2})$");
    assert!(p.is_raw());
    assert!(p.tokens().is_empty());
    assert!(p.matches("/reports/2024/08"));
    assert!(!p.matches("/reports/24/08"));

    // No token list: positional capture order.
    let vars = p.captures("/reports/2024/08").unwrap();
    assert_eq!(vars.as_slice(), ["2024", "08"]);
}

#[test]
fn test_root_template() {
    let p = CompiledPattern::compile("");
    assert_eq!(p.template(), "/");
    assert!(p.matches("/"));
    assert!(!p.matches("/x"));
}

#[test]
fn test_malformed_template_degrades_to_literal() {
    // `[` is not a valid character class; the substituted pattern fails to
    // compile and the matcher degrades to the literal template text.
    let p = CompiledPattern::compile("/users/{id:[}");
    assert!(p.tokens().is_empty());
    assert!(p.matches("/users/{id:[}"));
    assert!(!p.matches("/users/1"));
}

#[test]
fn test_invalid_token_name_passes_through_literally() {
    // `{1d}` does not match the token grammar; it stays literal text.
    let p = CompiledPattern::compile("/users/{1d}");
    assert!(p.tokens().is_empty());
    assert!(p.matches("/users/{1d}"));
    assert!(!p.matches("/users/7"));
}
