//! Section header rewriting.
//!
//! Benchmark authors mark remediation subsections with informally bolded
//! phrases (`**Remediate from GUI:**`, `**From Command Line**`, ...). This
//! pass rewrites them into level-3 headings.
//!
//! The rule list is hand-curated against real benchmark documents and is a
//! contract with downstream consumers of the generated docs: the exact phrase
//! set and the application order must not change.

use std::sync::LazyLock;

use regex::Regex;

static SECTION_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\*\*Remediate from (.*?):\*\*",
        r"\*\*Remediate from (.*?)\*\*",
        r"\*\*Remediation from (.*?):\*\*",
        r"\*\*Remediation from (.*?)\*\*",
        r"\*\*From (.*?):\*\*",
        r"\*\*From (.*?)\*\*",
        r"\*\*Audit from (.*?):\*\*",
        r"\*\*Audit from (.*?)\*\*",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("header rule pattern"))
    .collect()
});

static STEP_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Step (.*?)\*\*").expect("step rule pattern"));

/// Rewrite bolded section markers into level-3 Markdown headings.
///
/// Only the matched bold span is replaced; surrounding text is untouched.
///
/// # Examples
///
/// ```
/// use cisdoc::markdown::rewrite_section_headers;
///
/// assert_eq!(
///     rewrite_section_headers("**Remediate from GUI:**\ndo X"),
///     "### From GUI\ndo X"
/// );
/// assert_eq!(rewrite_section_headers("**Step 2**"), "### Step 2");
/// ```
pub fn rewrite_section_headers(text: &str) -> String {
    let mut text = text.to_string();
    for rule in SECTION_RULES.iter() {
        text = rule.replace_all(&text, "### From $1").into_owned();
    }
    STEP_RULE.replace_all(&text, "### Step $1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remediate_with_colon() {
        assert_eq!(
            rewrite_section_headers("**Remediate from GUI:**"),
            "### From GUI"
        );
    }

    #[test]
    fn test_remediate_without_colon() {
        assert_eq!(
            rewrite_section_headers("**Remediate from GUI**"),
            "### From GUI"
        );
    }

    #[test]
    fn test_remediation_variants() {
        assert_eq!(
            rewrite_section_headers("**Remediation from Command Line:**"),
            "### From Command Line"
        );
        assert_eq!(
            rewrite_section_headers("**Remediation from Command Line**"),
            "### From Command Line"
        );
    }

    #[test]
    fn test_from_variants() {
        assert_eq!(rewrite_section_headers("**From GUI:**"), "### From GUI");
        assert_eq!(rewrite_section_headers("**From GUI**"), "### From GUI");
    }

    #[test]
    fn test_audit_variants() {
        assert_eq!(
            rewrite_section_headers("**Audit from PowerShell:**"),
            "### From PowerShell"
        );
        assert_eq!(
            rewrite_section_headers("**Audit from PowerShell**"),
            "### From PowerShell"
        );
    }

    #[test]
    fn test_step_rule() {
        assert_eq!(rewrite_section_headers("**Step 1**"), "### Step 1");
    }

    #[test]
    fn test_surrounding_text_untouched() {
        // Only the bold span is replaced; trailing text keeps its position.
        assert_eq!(
            rewrite_section_headers("**Remediation from GUI:** do X"),
            "### From GUI do X"
        );
        assert_eq!(
            rewrite_section_headers("intro\n\n**From GUI:**\n\n1. do X"),
            "intro\n\n### From GUI\n\n1. do X"
        );
    }

    #[test]
    fn test_multiple_occurrences() {
        let input = "**From GUI:**\nsteps\n\n**From Command Line:**\nmore";
        assert_eq!(
            rewrite_section_headers(input),
            "### From GUI\nsteps\n\n### From Command Line\nmore"
        );
    }

    #[test]
    fn test_lazy_capture_stops_at_first_bold_close() {
        assert_eq!(
            rewrite_section_headers("**From A** and **From B**"),
            "### From A and ### From B"
        );
    }

    #[test]
    fn test_unrelated_bold_untouched() {
        assert_eq!(rewrite_section_headers("**Note:** keep"), "**Note:** keep");
    }
}
