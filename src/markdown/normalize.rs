//! Per-line normalization pass.
//!
//! This is the first stage of the pipeline: it normalizes line endings, trims
//! trailing whitespace, auto-links bare URLs, and enforces terminal punctuation
//! on ordered-list items. Content inside fenced code blocks is left untouched
//! apart from whitespace trimming.
//!
//! Fence tracking is carried in an explicit [`NormalizerState`] value threaded
//! through the per-line fold, so multiple documents can be normalized
//! concurrently without shared state.

use super::classify::{is_list_item, is_url};

/// State threaded through a single document pass.
#[derive(Debug, Default, Clone, Copy)]
struct NormalizerState {
    in_code_block: bool,
}

/// True when a line already carries terminal punctuation.
///
/// The accepted endings (`.`, `` .` ``, `:`, `,`) come from the source
/// documents; lines ending any other way get a `.` appended by the
/// normalizer and the renumberer.
pub(crate) fn has_terminal_punctuation(line: &str) -> bool {
    line.ends_with('.') || line.ends_with(".`") || line.ends_with(':') || line.ends_with(',')
}

/// Wrap a bare URL token as a Markdown link.
///
/// A trailing `.` is sentence punctuation, not part of the URL; it is moved
/// outside the link.
fn linkify_token(token: &str) -> String {
    match token.strip_suffix('.') {
        Some(url) if is_url(url) => format!("[{url}]({url})."),
        _ => format!("[{token}]({token})"),
    }
}

/// Replace every bare URL token in a line with a Markdown link.
fn autolink_urls(line: &str) -> String {
    if !line.contains("http") {
        return line.to_string();
    }
    line.split(' ')
        .map(|token| {
            if is_url(token) {
                linkify_token(token)
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_line(state: &mut NormalizerState, line: &str) -> String {
    let line = autolink_urls(line);
    let trimmed = line.trim();

    let is_fence_line = trimmed.starts_with("```");
    if is_fence_line {
        state.in_code_block = !state.in_code_block;
    }
    if state.in_code_block || is_fence_line {
        return trimmed.to_string();
    }

    let stripped = line.trim_end();
    if is_list_item(stripped, true) && !has_terminal_punctuation(stripped) {
        format!("{stripped}.")
    } else {
        stripped.to_string()
    }
}

/// Normalize every line of a document.
///
/// Line endings are normalized to `\n` first, then each line is processed in
/// order while tracking code-fence boundaries.
///
/// # Examples
///
/// ```
/// use cisdoc::markdown::normalize_lines;
///
/// assert_eq!(normalize_lines("1. run the command"), "1. run the command.");
/// assert_eq!(normalize_lines("trailing spaces   "), "trailing spaces");
/// assert_eq!(
///     normalize_lines("see https://example.com for details"),
///     "see [https://example.com](https://example.com) for details"
/// );
/// ```
pub fn normalize_lines(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut state = NormalizerState::default();
    text.split('\n')
        .map(|line| normalize_line(&mut state, line))
        .collect::<Vec<_>>()
        .join("\n")
}
