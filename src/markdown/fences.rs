//! Code-fence language tagging and embedded JSON reformatting.
//!
//! Splitting a document on the literal triple-backtick delimiter yields
//! alternating prose (even index) and fenced content (odd index) segments. A
//! well-formed document always splits into an odd number of segments; an even
//! count means an unclosed fence, which is a defect in the caller's input and
//! is reported as [`Error::UnmatchedFence`] rather than patched over.
//!
//! Fenced segments whose content opens with a JSON object are tagged `json`
//! and pretty-printed; everything else is tagged `bash` and left verbatim.

use tracing::warn;

use crate::error::{Error, Result};

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceLang {
    Bash,
    Json,
}

impl FenceLang {
    fn tag(self) -> &'static str {
        match self {
            FenceLang::Bash => "bash",
            FenceLang::Json => "json",
        }
    }
}

/// Strip `//` line comments and `/* */` block comments from JSON text.
///
/// Comment markers inside string literals are preserved.
fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    while let Some(&next) = chars.peek() {
                        if next == '\n' {
                            break;
                        }
                        chars.next();
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for next in chars.by_ref() {
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                }
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }

    out
}

/// Parse a JSON-with-comments payload and re-serialize it with 2-space
/// indentation.
///
/// Key order is preserved across the round-trip. Returns `None` (after
/// logging a diagnostic) when the payload does not parse; the caller keeps
/// the original text in that case.
///
/// # Examples
///
/// ```
/// use cisdoc::markdown::format_json_string;
///
/// let formatted = format_json_string("{\"a\": 1, \"b\": [2, 3]}").unwrap();
/// assert_eq!(formatted, "{\n  \"a\": 1,\n  \"b\": [\n    2,\n    3\n  ]\n}");
///
/// assert!(format_json_string("not json").is_none());
/// ```
pub fn format_json_string(json: &str) -> Option<String> {
    let stripped = strip_json_comments(json);
    match serde_json::from_str::<serde_json::Value>(&stripped) {
        Ok(value) => serde_json::to_string_pretty(&value).ok(),
        Err(e) => {
            warn!(error = %e, "invalid JSON in fenced block, keeping original text");
            None
        }
    }
}

/// Assign a language tag to every code fence in a document.
///
/// Fences whose content starts with `\n{` are tagged `json` and their payload
/// is pretty-printed; all other fences are tagged `bash` and their payload is
/// kept verbatim. Paragraph separation around fences is repaired: a newline is
/// inserted before an opening fence (unless the preceding prose already ends
/// with a blank line) and after a closing fence (unless the following prose
/// already starts with one).
///
/// The number of fence delimiters in the output always equals the input.
///
/// # Errors
///
/// Returns [`Error::UnmatchedFence`] when the document contains an unclosed
/// fence.
///
/// # Examples
///
/// ```
/// use cisdoc::markdown::tag_code_fences;
///
/// let tagged = tag_code_fences("Run:\n```\nls -la\n```\ndone").unwrap();
/// assert_eq!(tagged, "Run:\n\n```bash\nls -la\n```\n\ndone");
/// ```
pub fn tag_code_fences(text: &str) -> Result<String> {
    let parts: Vec<&str> = text.split(FENCE).collect();
    if parts.len() % 2 == 0 {
        return Err(Error::UnmatchedFence);
    }

    let mut out = String::with_capacity(text.len() + parts.len() * 8);
    let mut lang = FenceLang::Bash;

    for (index, part) in parts.iter().enumerate() {
        if index == parts.len() - 1 {
            out.push_str(part);
        } else if index % 2 == 0 {
            // Prose segment: decide the next fence's language by peeking at
            // the fenced content that follows.
            lang = if parts[index + 1].starts_with("\n{") {
                FenceLang::Json
            } else {
                FenceLang::Bash
            };
            out.push_str(part);
            if !part.ends_with("\n\n") {
                out.push('\n');
            }
            out.push_str(FENCE);
            out.push_str(lang.tag());
        } else {
            match lang {
                FenceLang::Bash => {
                    out.push_str(part);
                    out.push_str(FENCE);
                }
                FenceLang::Json => {
                    out.push('\n');
                    match format_json_string(part) {
                        Some(formatted) => out.push_str(&formatted),
                        None => out.push_str(part),
                    }
                    out.push('\n');
                    out.push_str(FENCE);
                }
            }
            if !parts[index + 1].starts_with("\n\n") {
                out.push('\n');
            }
        }
    }

    Ok(out)
}
