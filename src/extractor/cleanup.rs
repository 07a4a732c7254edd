use regex::Regex;
use std::sync::LazyLock;

/// Texts at or above this many characters get cut down.
pub const EXCERPT_LIMIT: usize = 200;
pub const ELLIPSIS: &str = "...";

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip tabs and shorten long text.
///
/// Text shorter than [`EXCERPT_LIMIT`] characters comes back unchanged.
/// Anything longer keeps its first `EXCERPT_LIMIT + 1` characters followed
/// by [`ELLIPSIS`]; the extra character is what previously cached snippets
/// contain, so it stays. Counting is per `char`, never per byte.
pub fn cleanup(content: &str) -> String {
    let content: String = content.chars().filter(|&c| c != '\t').collect();

    if content.chars().count() < EXCERPT_LIMIT {
        return content;
    }

    let mut truncated: String = content.chars().take(EXCERPT_LIMIT + 1).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Collapse every whitespace run (newlines included) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let text = "a".repeat(150);
        assert_eq!(cleanup(&text), text);
    }

    #[test]
    fn test_long_text_keeps_201_chars() {
        let text: String = ('a'..='z').cycle().take(250).collect();
        let cleaned = cleanup(&text);

        assert_eq!(cleaned.chars().count(), 204);
        assert!(cleaned.ends_with("..."));
        assert_eq!(&cleaned[..201], &text[..201]);
    }

    #[test]
    fn test_boundary_lengths() {
        let just_under = "x".repeat(199);
        assert_eq!(cleanup(&just_under), just_under);

        let exactly = "x".repeat(200);
        assert_eq!(cleanup(&exactly), format!("{exactly}..."));

        let one_over = "x".repeat(201);
        assert_eq!(cleanup(&one_over), format!("{one_over}..."));
    }

    #[test]
    fn test_tabs_always_removed() {
        assert_eq!(cleanup("\tHello\tworld\t"), "Helloworld");

        let long = format!("{}\t{}", "a".repeat(150), "b".repeat(150));
        let cleaned = cleanup(&long);
        assert!(!cleaned.contains('\t'));
        assert_eq!(cleaned, format!("{}{}...", "a".repeat(150), "b".repeat(51)));
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let text = "é".repeat(199);
        assert_eq!(cleanup(&text), text);

        let long = "日本".repeat(150);
        let cleaned = cleanup(&long);
        assert_eq!(cleaned.chars().count(), 204);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  Hello \n\n  world\tagain  "),
            "Hello world again"
        );
    }
}
