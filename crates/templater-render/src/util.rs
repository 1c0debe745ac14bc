//! Text helpers shared by the loader and the CLI.

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
///
/// ```rust
/// use templater_render::util::normalize_newlines;
///
/// assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
/// ```
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(normalize_newlines("one\ntwo\n"), "one\ntwo\n");
        assert_eq!(normalize_newlines(""), "");
    }

    #[test]
    fn test_mixed_endings() {
        assert_eq!(normalize_newlines("a\r\n\r\nb\r"), "a\n\nb\n");
    }
}
