//! Ordered-list renumbering.
//!
//! Benchmark authors number every ordered-list line `1.` and let the renderer
//! sort it out. This pass re-walks a normalized document and rewrites each run
//! of `1.`-prefixed lines into a correctly incrementing sequence, restarting
//! at a blank line, at any other kind of list item, or at the end of input.
//!
//! The pass is a two-state machine with the state passed by value between
//! line steps, which keeps it testable line by line and free of shared
//! mutable counters.

use super::classify::is_list_item;
use super::normalize::has_terminal_punctuation;

/// Where the cursor is relative to a run of `1.`-numbered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Outside,
    Inside { counter: u32 },
}

/// True for lines that open (or continue) a manually numbered run: a literal
/// `1.` at the start of the line followed by whitespace.
fn is_list_head(line: &str) -> bool {
    line.strip_prefix("1.")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

fn step(state: ListState, line: &str, out: &mut Vec<String>) -> ListState {
    if is_list_head(line) {
        let counter = match state {
            ListState::Outside => {
                // A list must be visually separated from preceding prose.
                if out.last().is_some_and(|prev| !prev.is_empty()) {
                    out.push(String::new());
                }
                1
            }
            ListState::Inside { counter } => counter + 1,
        };

        let rest = &line[2..];
        let mut renumbered = format!("{counter}.{rest}");
        if !has_terminal_punctuation(&renumbered) {
            renumbered.push('.');
        }
        out.push(renumbered);
        return ListState::Inside { counter };
    }

    let ends_run = line.trim().is_empty() || is_list_item(line, false);
    out.push(line.to_string());
    match state {
        ListState::Inside { .. } if ends_run => ListState::Outside,
        other => other,
    }
}

/// Renumber every run of `1.`-prefixed list lines in a document.
///
/// Lines that do not start a list item pass through unchanged; the pass is
/// the identity on documents without `1.` lines and a fixed point on its own
/// output.
///
/// # Examples
///
/// ```
/// use cisdoc::markdown::renumber_lists;
///
/// let input = "1. first\n1. second\n\n1. fresh start";
/// assert_eq!(
///     renumber_lists(input),
///     "1. first.\n2. second.\n\n1. fresh start."
/// );
/// ```
pub fn renumber_lists(text: &str) -> String {
    let mut out = Vec::new();
    let mut state = ListState::Outside;
    for line in text.split('\n') {
        state = step(state, line, &mut out);
    }
    out.join("\n")
}
