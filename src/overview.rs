//! Benchmark-wide overview document assembly.
//!
//! Distinct from the per-recommendation documents: a single page synthesized
//! from the workbook's glossary sheet, which carries a top-level `Overview`
//! paragraph and one free-text description per `Level N` profile.

use crate::error::Result;
use crate::markdown::{normalize_lines, tag_code_fences};

/// The placeholder phrase authors use in the glossary overview paragraph.
const GENERIC_PHRASE: &str = "This benchmark";

/// First cell of each row, trimmed; rows without a first cell are `None`.
fn first_cells(rows: &[Vec<Option<String>>]) -> Vec<Option<&str>> {
    rows.iter()
        .map(|row| row.first().and_then(|cell| cell.as_deref()).map(str::trim))
        .collect()
}

/// Assemble the benchmark overview document from glossary sheet rows.
///
/// Scans the rows in order: a cell equal to `Overview` captures the first
/// line of the following row as the overview paragraph (with the generic
/// placeholder phrase replaced by a benchmark-specific one); a cell starting
/// with `Level ` pairs that label with the following row as a profile
/// description. The assembled document is run through line normalization and
/// fence tagging; there are no generated ordered lists, so renumbering does
/// not apply.
///
/// # Errors
///
/// Returns [`crate::Error::UnmatchedFence`] when a glossary cell contains an
/// unclosed code fence.
pub fn assemble_overview(rows: &[Vec<Option<String>>], benchmark_name: &str) -> Result<String> {
    let cells = first_cells(rows);

    let mut paragraph: Option<String> = None;
    let mut levels: Vec<(String, String)> = Vec::new();

    for (index, cell) in cells.iter().enumerate() {
        let Some(cell) = cell else { continue };
        let Some(Some(next)) = cells.get(index + 1) else {
            continue;
        };

        if *cell == "Overview" {
            let first_line = next.lines().next().unwrap_or_default();
            paragraph = Some(first_line.replace(
                GENERIC_PHRASE,
                &format!("The {benchmark_name} Benchmark"),
            ));
        } else if cell.starts_with("Level ") {
            levels.push(((*cell).to_string(), (*next).to_string()));
        }
    }

    let paragraph = paragraph.unwrap_or_else(|| {
        format!(
            "The {benchmark_name} Benchmark provides prescriptive guidance for \
             establishing a secure configuration posture."
        )
    });

    let mut doc = format!(
        "This page describes the configuration profiles defined by the \
         {benchmark_name} Benchmark.\n\n## Overview\n\n{paragraph}\n\n## Profiles"
    );
    for (label, description) in &levels {
        doc.push_str(&format!("\n\n### {label}\n\n{description}"));
    }

    // Spreadsheet prose often carries double-spaced sentences.
    while doc.contains("  ") {
        doc = doc.replace("  ", " ");
    }

    let doc = normalize_lines(&doc);
    let mut doc = tag_code_fences(&doc)?;

    while doc.ends_with("\n\n") {
        doc.pop();
    }
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str) -> Vec<Option<String>> {
        vec![Some(text.to_string())]
    }

    fn glossary() -> Vec<Vec<Option<String>>> {
        vec![
            row("Overview"),
            row("This benchmark provides guidance for securing the platform.\nSecond line ignored."),
            row("Level 1"),
            row("Baseline settings  with minimal impact."),
            row("Level 2"),
            row("Defense-in-depth settings."),
        ]
    }

    #[test]
    fn test_overview_paragraph_substituted() {
        let doc = assemble_overview(&glossary(), "Example Platform").unwrap();
        assert!(doc.contains(
            "The Example Platform Benchmark provides guidance for securing the platform."
        ));
        assert!(!doc.contains("This benchmark provides"));
        assert!(!doc.contains("Second line ignored"));
    }

    #[test]
    fn test_profiles_section_lists_levels() {
        let doc = assemble_overview(&glossary(), "Example Platform").unwrap();
        assert!(doc.contains("## Profiles"));
        assert!(doc.contains("### Level 1\n\nBaseline settings with minimal impact."));
        assert!(doc.contains("### Level 2\n\nDefense-in-depth settings."));
    }

    #[test]
    fn test_double_spaces_collapsed() {
        let doc = assemble_overview(&glossary(), "Example Platform").unwrap();
        assert!(!doc.contains("  "));
    }

    #[test]
    fn test_missing_overview_row_uses_fallback() {
        let rows = vec![row("Level 1"), row("Baseline.")];
        let doc = assemble_overview(&rows, "Example Platform").unwrap();
        assert!(doc.contains("The Example Platform Benchmark provides prescriptive guidance"));
    }

    #[test]
    fn test_empty_rows_ignored() {
        let mut rows = glossary();
        rows.insert(0, vec![None]);
        rows.push(Vec::new());
        let doc = assemble_overview(&rows, "Example Platform").unwrap();
        assert!(doc.contains("### Level 2"));
    }

    #[test]
    fn test_single_trailing_newline() {
        let doc = assemble_overview(&glossary(), "Example Platform").unwrap();
        assert!(doc.ends_with('\n'));
        assert!(!doc.ends_with("\n\n"));
    }
}
