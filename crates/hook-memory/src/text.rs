//! Character-safe truncation helpers.

/// Marker appended to fragments cut by the context budget.
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// First `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to `max_chars` characters, appending the marker when cut.
pub fn truncate_with_marker(s: &str, max_chars: usize) -> String {
    let cut = truncate_chars(s, max_chars);
    if cut.len() < s.len() {
        format!("{}{}", cut, TRUNCATION_MARKER)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_with_marker() {
        assert_eq!(truncate_with_marker("short", 10), "short");
        assert_eq!(truncate_with_marker("abcdef", 3), "abc\n... (truncated)");
    }
}
