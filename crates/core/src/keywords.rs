//! Reserved-word mangling for field, enumerator and type names
//!
//! The code generator prefixes names that collide with a reserved word with
//! [`MARKER`] (`await` is stored as `_await`). The plain form never carries the
//! marker:
//!
//! - encoding strips a leading marker unconditionally
//! - decoding re-applies it when the lower-cased name is reserved
//!
//! The reserved-word check is case-insensitive on decode only.

use std::borrow::Cow;

/// Prefix marking a name that collides with a reserved word.
pub const MARKER: char = '_';

/// Reserved words, sorted for binary search.
const RESERVED: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Exact membership test against the reserved set.
pub fn is_reserved(name: &str) -> bool {
    RESERVED.binary_search(&name).is_ok()
}

/// Plain form of an internal name: the marker is always stripped.
pub fn unmangle(name: &str) -> &str {
    name.strip_prefix(MARKER).unwrap_or(name)
}

/// Internal form of a plain name: marked when its lower-cased form is reserved.
pub fn mangle(name: &str) -> Cow<'_, str> {
    if is_reserved(&name.to_lowercase()) {
        Cow::Owned(marked(name))
    } else {
        Cow::Borrowed(name)
    }
}

/// The marker-prefixed alternate of a name, used when resolving a segment
/// that is absent under its plain spelling.
pub fn marked(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    out.push(MARKER);
    out.push_str(name);
    out
}
