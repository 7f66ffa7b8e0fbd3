//! Literal-to-pattern escaping for emote codes.

/// Escape `literal` so it matches itself inside a regular expression.
///
/// Hyphens become `\x2d` rather than `\-`.
pub fn escape_pattern(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() * 2);
    for ch in literal.chars() {
        match ch {
            '|' | '\\' | '{' | '}' | '(' | ')' | '[' | ']' | '^' | '$' | '+' | '*' | '?' | '.' => {
                out.push('\\');
                out.push(ch);
            }
            '-' => out.push_str("\\x2d"),
            _ => out.push(ch),
        }
    }
    out
}
