//!
//! Small string helpers shared by the configuration layer and the trie.
//!
//! This module provides:
//! - [`replace_handlebars_with_env`] - Template substitution for environment variables
//! - [`normalize_path`] - Leading-slash normalization for registered patterns
//! - [`longest_common_prefix`] - Byte-wise LCP used when inserting routes
//!

use {
    regex::{Captures, Regex},
    std::{borrow::Cow, env, sync::LazyLock},
};

/// Regular expression pattern for matching handlebars-style environment variable references.
/// Matches patterns like `{{ VAR_NAME }}` with optional whitespace around the variable name.
/// Variable names must be uppercase letters, digits, or underscores (standard env var naming).
static HANDLEBAR_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Z0-9_]+)\s*\}\}").unwrap());

/// Replaces every `{{ VAR }}` occurrence with the value of the environment
/// variable `VAR`. Unset variables are replaced with an empty string.
///
/// ```
/// use radix_router::replace_handlebars_with_env;
///
/// unsafe { std::env::set_var("ROUTER_DOC_PREFIX", "/api") };
/// let toml = replace_handlebars_with_env(r#"path = "{{ ROUTER_DOC_PREFIX }}/users""#);
/// assert_eq!(toml, r#"path = "/api/users""#);
/// ```
pub fn replace_handlebars_with_env(input: &str) -> String {
    HANDLEBAR_REGEXP
        .replace_all(input, |caps: &Captures| {
            env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

/// Normalizes a route pattern so that it always starts with `/`.
/// An empty pattern becomes `/`.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        Cow::Borrowed("/")
    } else if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Length in bytes of the longest common prefix of `a` and `b`.
///
/// The result is rounded down to a char boundary, so both `a[..l]` and
/// `b[..l]` are valid slices even when the inputs diverge inside a multi-byte
/// character.
pub fn longest_common_prefix(a: &str, b: &str) -> usize {
    let l = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    floor_char_boundary(a, l)
}

/// Largest index `<= index` that lies on a char boundary of `s`.
pub(crate) fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
