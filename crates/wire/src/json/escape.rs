//! JSON string quoting
//!
//! Two paths produce identical text:
//!
//! - fast: short strings with nothing to escape are copied verbatim
//! - full: every `"`, `\` and control character is escaped
//!
//! Escapes follow JSON.stringify (and serde_json): `\b \t \n \f \r` use their
//! short forms, other control characters use lowercase `\u00XX`, and
//! everything else, including U+007F and non-ASCII, is written as is.

/// Quote `s` into `out`, taking the fast path when `s` is shorter than
/// `fast_limit` UTF-16 code units and contains nothing to escape.
pub fn write_quoted(out: &mut String, s: &str, fast_limit: usize) {
    if is_short(s, fast_limit) && !needs_escape(s) {
        out.reserve(s.len() + 2);
        out.push('"');
        out.push_str(s);
        out.push('"');
    } else {
        write_quoted_full(out, s);
    }
}

/// Quote `s` into `out`, escaping every character that needs it.
pub fn write_quoted_full(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if c < '\u{20}' => {
                const HEX: &[u8; 16] = b"0123456789abcdef";
                let b = c as u8;
                out.push_str("\\u00");
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xf) as usize] as char);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Quoted copy of `s`.
pub fn quote(s: &str) -> String {
    let mut out = String::new();
    write_quoted_full(&mut out, s);
    out
}

fn needs_escape(s: &str) -> bool {
    s.bytes().any(|b| b == b'"' || b == b'\\' || b < 0x20)
}

// UTF-16 length never exceeds the byte length, so most strings are decided
// without counting code units.
fn is_short(s: &str, limit: usize) -> bool {
    s.len() < limit || s.encode_utf16().take(limit).count() < limit
}
