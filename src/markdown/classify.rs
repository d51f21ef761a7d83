//! Pure line classification predicates.
//!
//! These functions decide whether a line of prose is a Markdown list item and
//! whether a token is a bare URL. They carry no state and are safe to call on
//! arbitrary (including empty) input.

/// Classify a line as a Markdown list item.
///
/// A line is a list item when, after trimming surrounding whitespace:
///
/// - its first character is a digit and the second is `)`, `.`, or `:`
///   (`1. step`, `2) step`, `3: step`), or
/// - its first two characters are digits and the third is `)`, `.`, or `:`
///   (two-digit item numbers like `10. step`), or
/// - `ignore_unordered` is false and it starts with `-`, `*`, or `+`
///   followed by a space.
///
/// # Examples
///
/// ```
/// use cisdoc::markdown::is_list_item;
///
/// assert!(is_list_item("1. Run the command", true));
/// assert!(is_list_item("12) Open the console", true));
/// assert!(is_list_item("- a bullet", false));
/// assert!(!is_list_item("- a bullet", true));
/// assert!(!is_list_item("plain prose", true));
/// ```
pub fn is_list_item(line: &str, ignore_unordered: bool) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let second = chars.next();
    let third = chars.next();

    if first.is_ascii_digit() {
        return match second {
            Some(')' | '.' | ':') => true,
            Some(c) if c.is_ascii_digit() => matches!(third, Some(')' | '.' | ':')),
            _ => false,
        };
    }

    !ignore_unordered && matches!(first, '-' | '*' | '+') && second == Some(' ')
}

/// True iff the token is a bare HTTP or HTTPS URL.
///
/// # Examples
///
/// ```
/// use cisdoc::markdown::is_url;
///
/// assert!(is_url("https://example.com/path"));
/// assert!(is_url("http://example.com"));
/// assert!(!is_url("ftp://example.com"));
/// assert!(!is_url("example.com"));
/// ```
pub fn is_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_single_digit() {
        assert!(is_list_item("1. step", true));
        assert!(is_list_item("2) step", true));
        assert!(is_list_item("3: step", true));
    }

    #[test]
    fn test_ordered_two_digit() {
        assert!(is_list_item("10. step", true));
        assert!(is_list_item("42) step", true));
        assert!(is_list_item("99: step", true));
    }

    #[test]
    fn test_ordered_with_leading_whitespace() {
        assert!(is_list_item("   1. indented", true));
    }

    #[test]
    fn test_unordered_markers() {
        assert!(is_list_item("- item", false));
        assert!(is_list_item("* item", false));
        assert!(is_list_item("+ item", false));
    }

    #[test]
    fn test_unordered_ignored() {
        assert!(!is_list_item("- item", true));
        assert!(!is_list_item("* item", true));
        assert!(!is_list_item("+ item", true));
    }

    #[test]
    fn test_unordered_requires_space() {
        assert!(!is_list_item("-item", false));
        assert!(!is_list_item("*emphasis*", false));
    }

    #[test]
    fn test_not_list_items() {
        assert!(!is_list_item("plain text", true));
        assert!(!is_list_item("version 2 of the tool", true));
        assert!(!is_list_item("1a. odd marker", true));
    }

    #[test]
    fn test_empty_and_short_lines() {
        assert!(!is_list_item("", true));
        assert!(!is_list_item("   ", true));
        assert!(!is_list_item("1", true));
        assert!(!is_list_item("12", true));
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://docs.example.com/a/b?q=1"));
        assert!(!is_url("httpx://example.com"));
        assert!(!is_url(""));
        assert!(!is_url("see https://example.com"));
    }
}
