//! Output orchestration: workbook in, Markdown files out.
//!
//! Everything here is I/O glue around the pipeline: loading the workbook,
//! fanning out over recommendation rows, and laying out the output directory
//! as `{output}/cis_v{version}/docs/{filename}`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::overview::assemble_overview;
use crate::record::{BenchmarkRecord, Document, assemble_body, doc_filename};
use crate::workbook::{PROFILES_SHEET, Workbook, extract_benchmark_info};

/// What to generate and where.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Generate per-recommendation documentation.
    pub docs: bool,
    /// Generate controls. The hook is wired through but currently produces
    /// nothing; kept so callers do not need to change when it lands.
    pub controls: bool,
    /// Root output directory.
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            docs: true,
            controls: false,
            output_dir: PathBuf::from("./"),
        }
    }
}

/// Counts of what a run produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub documents_written: usize,
    pub records_skipped: usize,
}

/// Generate documentation from a benchmark workbook.
///
/// The workbook filename must follow the CIS naming convention so the
/// benchmark name and version can be derived from it. Documents land in
/// `{output}/cis_v{version}/docs/`; when the workbook carries a glossary
/// sheet, a benchmark-wide `cis_overview.md` is written alongside them.
///
/// # Errors
///
/// Fails when the file is not an XLSX workbook, its name does not match the
/// CIS convention, the `Combined Profiles` sheet is missing, or output files
/// cannot be written.
pub fn generate<P: AsRef<Path>>(benchmark: P, config: &GeneratorConfig) -> Result<GenerationSummary> {
    let path = benchmark.as_ref();
    if !path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
    {
        return Err(Error::InvalidWorkbook(format!(
            "'{}' is not an XLSX file",
            path.display()
        )));
    }

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidFilename(path.display().to_string()))?;
    let (benchmark_name, benchmark_version) = extract_benchmark_info(filename)
        .ok_or_else(|| Error::InvalidFilename(filename.to_string()))?;

    let mut workbook = Workbook::open(path)?;
    info!(
        benchmark = %benchmark_name,
        version = %benchmark_version,
        sheets = ?workbook.sheet_names(),
        "loaded benchmark workbook"
    );

    let mut summary = GenerationSummary::default();
    if !(config.docs || config.controls) {
        warn!("neither docs nor controls requested, nothing to generate");
        return Ok(summary);
    }

    let rows = workbook.rows(PROFILES_SHEET)?;
    let Some((headers, data)) = rows.split_first() else {
        return Err(Error::InvalidWorkbook(format!(
            "sheet '{PROFILES_SHEET}' is empty"
        )));
    };

    let docs_dir = config
        .output_dir
        .join(format!("cis_v{}", benchmark_version.replace('.', "")))
        .join("docs");
    if config.docs {
        fs::create_dir_all(&docs_dir)?;
    }

    for cells in data {
        let record = BenchmarkRecord::from_row(headers, cells);

        if config.docs {
            match assemble_document(&record, &benchmark_version)? {
                Some(doc) => {
                    info!(
                        recommendation = record
                            .recommendation
                            .as_deref()
                            .or(record.section.as_deref())
                            .unwrap_or("-"),
                        title = record.title.as_deref().unwrap_or("-"),
                        "processing"
                    );
                    fs::write(docs_dir.join(&doc.filename), &doc.body)?;
                    summary.documents_written += 1;
                }
                None => summary.records_skipped += 1,
            }
        }

        if config.controls {
            // Control generation hook: intentionally produces nothing yet.
        }
    }

    if config.docs
        && let Some(glossary) = workbook.glossary_sheet_name()
    {
        let glossary_rows = workbook.rows(&glossary)?;
        let overview = assemble_overview(&glossary_rows, &benchmark_name)?;
        fs::write(docs_dir.join("cis_overview.md"), overview)?;
        summary.documents_written += 1;
    }

    Ok(summary)
}

/// Assemble the document for one record, pairing the body with its filename.
///
/// Records without a body (missing section and title) and records that
/// produce a body but have no number to derive a filename from are skipped.
fn assemble_document(
    record: &BenchmarkRecord,
    benchmark_version: &str,
) -> Result<Option<Document>> {
    let Some(body) = assemble_body(record)? else {
        return Ok(None);
    };
    let Some(suffix) = record.file_suffix() else {
        warn!(
            title = record.title.as_deref().unwrap_or("-"),
            "record has no recommendation or section number, skipping"
        );
        return Ok(None);
    };
    Ok(Some(Document {
        filename: doc_filename(benchmark_version, &suffix),
        body,
    }))
}
