//! Benchmark records and per-recommendation document assembly.

use tracing::info;

use crate::error::Result;
use crate::markdown::{normalize_lines, renumber_lists, rewrite_section_headers, tag_code_fences};

/// Source spreadsheet column names, in sheet order.
pub const COLUMN_SECTION: &str = "Section #";
pub const COLUMN_RECOMMENDATION: &str = "Recommendation #";
pub const COLUMN_PROFILE: &str = "Profile";
pub const COLUMN_TITLE: &str = "Title";
pub const COLUMN_STATUS: &str = "Assessment Status";
pub const COLUMN_DESCRIPTION: &str = "Description";
pub const COLUMN_RATIONALE: &str = "Rationale Statement";
pub const COLUMN_REMEDIATION: &str = "Remediation Procedure";
pub const COLUMN_DEFAULT_VALUE: &str = "Default Value";

/// One recommendation row from the benchmark spreadsheet.
///
/// All fields are optional free text; a blank cell is `None`, and absent
/// sections are simply omitted from the output rather than rendered as empty
/// headings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkRecord {
    pub section: Option<String>,
    pub recommendation: Option<String>,
    pub profile: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub rationale: Option<String>,
    pub remediation: Option<String>,
    pub default_value: Option<String>,
}

impl BenchmarkRecord {
    /// Build a record from the sheet's header row and one data row.
    ///
    /// Fields are looked up by column name, so the sheet's column order does
    /// not matter. Blank and whitespace-only cells become `None`.
    pub fn from_row(headers: &[Option<String>], cells: &[Option<String>]) -> Self {
        let field = |name: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h.as_deref() == Some(name))
                .and_then(|i| cells.get(i).cloned().flatten())
                .filter(|value| !value.trim().is_empty())
        };

        Self {
            section: field(COLUMN_SECTION),
            recommendation: field(COLUMN_RECOMMENDATION),
            profile: field(COLUMN_PROFILE),
            title: field(COLUMN_TITLE),
            status: field(COLUMN_STATUS),
            description: field(COLUMN_DESCRIPTION),
            rationale: field(COLUMN_RATIONALE),
            remediation: field(COLUMN_REMEDIATION),
            default_value: field(COLUMN_DEFAULT_VALUE),
        }
    }

    /// Filename suffix for this record: the recommendation number (fallback:
    /// section number) with `.` replaced by `_`.
    pub fn file_suffix(&self) -> Option<String> {
        self.recommendation
            .as_deref()
            .or(self.section.as_deref())
            .map(|s| s.replace('.', "_"))
    }
}

/// One generated Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub body: String,
}

/// Derive the document filename for a benchmark version and record suffix.
///
/// # Examples
///
/// ```
/// use cisdoc::record::doc_filename;
///
/// assert_eq!(doc_filename("1.0.0", "2_1_1"), "cis_v100_2_1_1.md");
/// ```
pub fn doc_filename(version: &str, suffix: &str) -> String {
    format!("cis_v{}_{suffix}.md", version.replace('.', ""))
}

/// Assemble the Markdown body for one benchmark record.
///
/// Returns `Ok(None)` (a silent skip, not an error) when the record carries
/// neither a section number nor a title. Otherwise the body is built from the
/// record's prose fields and run through the full normalization pipeline.
///
/// # Errors
///
/// Returns [`crate::Error::UnmatchedFence`] when a prose field contains an
/// unclosed code fence.
pub fn assemble_body(record: &BenchmarkRecord) -> Result<Option<String>> {
    if record.section.is_none() && record.title.is_none() {
        info!("skipping record without section and title");
        return Ok(None);
    }

    let remediation = record
        .remediation
        .as_deref()
        .map(rewrite_section_headers);

    let mut markdown = String::from(if remediation.is_some() {
        "## Description"
    } else {
        "## Overview"
    });

    match &record.description {
        Some(description) => {
            markdown.push_str("\n\n");
            markdown.push_str(description);
        }
        None => {
            let title = record.title.as_deref().unwrap_or_default();
            markdown.push_str(&format!(
                "\n\nThis section covers security recommendations for {title}."
            ));
        }
    }

    if let Some(rationale) = &record.rationale {
        markdown.push_str("\n\n");
        markdown.push_str(rationale);
    }

    if let Some(remediation) = &remediation {
        markdown.push_str("\n\n## Remediation\n\n");
        markdown.push_str(remediation);
    }

    if let Some(default_value) = &record.default_value {
        let mut default_value = default_value.clone();
        if !default_value.ends_with('.')
            && !default_value.ends_with(".`")
            && default_value.split_whitespace().count() > 1
        {
            default_value.push('.');
        }
        markdown.push_str("\n\n### Default Value\n\n");
        markdown.push_str(&default_value);
    }

    let markdown = normalize_lines(&markdown);
    let markdown = tag_code_fences(&markdown)?;
    let mut markdown = renumber_lists(&markdown);

    // Exactly one trailing newline.
    while markdown.ends_with("\n\n") {
        markdown.pop();
    }
    if !markdown.ends_with('\n') {
        markdown.push('\n');
    }

    Ok(Some(markdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_title(title: &str) -> BenchmarkRecord {
        BenchmarkRecord {
            section: Some("1.1".into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_skip_without_section_and_title() {
        let record = BenchmarkRecord::default();
        assert_eq!(assemble_body(&record).unwrap(), None);
    }

    #[test]
    fn test_title_only_record_not_skipped() {
        let record = BenchmarkRecord {
            title: Some("Logging".into()),
            ..Default::default()
        };
        assert!(assemble_body(&record).unwrap().is_some());
    }

    #[test]
    fn test_overview_heading_without_remediation() {
        let body = assemble_body(&record_with_title("Logging")).unwrap().unwrap();
        assert!(body.starts_with("## Overview\n\n"));
    }

    #[test]
    fn test_description_heading_with_remediation() {
        let mut record = record_with_title("Logging");
        record.remediation = Some("do the thing".into());
        let body = assemble_body(&record).unwrap().unwrap();
        assert!(body.starts_with("## Description\n\n"));
        assert!(body.contains("\n\n## Remediation\n\ndo the thing"));
    }

    #[test]
    fn test_fallback_description_references_title() {
        let body = assemble_body(&record_with_title("Audit Policy")).unwrap().unwrap();
        assert!(body.contains("This section covers security recommendations for Audit Policy."));
    }

    #[test]
    fn test_description_used_when_present() {
        let mut record = record_with_title("Logging");
        record.description = Some("Ensure logging is enabled".into());
        let body = assemble_body(&record).unwrap().unwrap();
        assert!(body.contains("Ensure logging is enabled"));
        assert!(!body.contains("This section covers"));
    }

    #[test]
    fn test_rationale_appended() {
        let mut record = record_with_title("Logging");
        record.rationale = Some("Because auditors say so".into());
        let body = assemble_body(&record).unwrap().unwrap();
        assert!(body.contains("\n\nBecause auditors say so"));
    }

    #[test]
    fn test_default_value_gets_period() {
        let mut record = record_with_title("Logging");
        record.default_value = Some("Enabled by default".into());
        let body = assemble_body(&record).unwrap().unwrap();
        assert!(body.contains("### Default Value\n\nEnabled by default.\n"));
    }

    #[test]
    fn test_single_token_default_value_unpunctuated() {
        let mut record = record_with_title("Logging");
        record.default_value = Some("Enabled".into());
        let body = assemble_body(&record).unwrap().unwrap();
        assert!(body.contains("### Default Value\n\nEnabled\n"));
    }

    #[test]
    fn test_default_value_existing_period_kept() {
        let mut record = record_with_title("Logging");
        record.default_value = Some("Set to `auto.`".into());
        let body = assemble_body(&record).unwrap().unwrap();
        assert!(body.contains("Set to `auto.`\n"));
        assert!(!body.contains("auto.`."));
    }

    #[test]
    fn test_remediation_headers_rewritten() {
        let mut record = record_with_title("Logging");
        record.remediation = Some("**Remediate from GUI:**\n\n1. open settings".into());
        let body = assemble_body(&record).unwrap().unwrap();
        assert!(body.contains("### From GUI"));
        assert!(body.contains("1. open settings."));
    }

    #[test]
    fn test_exactly_one_trailing_newline() {
        let body = assemble_body(&record_with_title("Logging")).unwrap().unwrap();
        assert!(body.ends_with('\n'));
        assert!(!body.ends_with("\n\n"));
    }

    #[test]
    fn test_file_suffix_prefers_recommendation() {
        let record = BenchmarkRecord {
            section: Some("2.1".into()),
            recommendation: Some("2.1.1".into()),
            ..Default::default()
        };
        assert_eq!(record.file_suffix().as_deref(), Some("2_1_1"));
    }

    #[test]
    fn test_file_suffix_falls_back_to_section() {
        let record = BenchmarkRecord {
            section: Some("2.1".into()),
            ..Default::default()
        };
        assert_eq!(record.file_suffix().as_deref(), Some("2_1"));
    }

    #[test]
    fn test_from_row_maps_by_header_name() {
        let headers: Vec<Option<String>> = [
            COLUMN_SECTION,
            COLUMN_RECOMMENDATION,
            COLUMN_TITLE,
            COLUMN_DESCRIPTION,
        ]
        .iter()
        .map(|s| Some((*s).to_string()))
        .collect();
        let cells = vec![
            Some("1.2".to_string()),
            None,
            Some("Ensure X".to_string()),
            Some("   ".to_string()),
        ];

        let record = BenchmarkRecord::from_row(&headers, &cells);
        assert_eq!(record.section.as_deref(), Some("1.2"));
        assert_eq!(record.recommendation, None);
        assert_eq!(record.title.as_deref(), Some("Ensure X"));
        // Whitespace-only cells are treated as empty.
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_from_row_short_row() {
        let headers = vec![Some(COLUMN_SECTION.to_string()), Some(COLUMN_TITLE.to_string())];
        let cells = vec![Some("3.1".to_string())];
        let record = BenchmarkRecord::from_row(&headers, &cells);
        assert_eq!(record.section.as_deref(), Some("3.1"));
        assert_eq!(record.title, None);
    }
}
