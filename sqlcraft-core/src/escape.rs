//! String escaping for SQL literals

/// Escape a raw string for embedding in a single-quoted SQL literal.
///
/// Follows the same rules as MySQL's `real_escape_string`: quotes,
/// backslashes and control characters are backslash-escaped. This is only
/// ever applied to scalar values going through a value map; identifiers and
/// raw predicate fragments are passed through verbatim by the builders.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{1a}' => out.push_str("\\Z"),
            _ => out.push(c),
        }
    }
    out
}
