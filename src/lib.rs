//! # cisdoc
//!
//! Converts CIS benchmark workbooks (one spreadsheet row per recommendation)
//! into clean, consistently formatted Markdown documents.
//!
//! ## Features
//!
//! - Deterministic Markdown normalization: code-fence language tagging,
//!   ordered-list renumbering, URL auto-linking, section-header rewriting
//! - Embedded JSON (with comments) reformatted with stable indentation
//! - XLSX loading with no spreadsheet framework, just ZIP + XML
//! - Benchmark-wide overview document synthesized from the glossary sheet
//!
//! ## Quick Start
//!
//! ```no_run
//! use cisdoc::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     docs: true,
//!     controls: false,
//!     output_dir: "out".into(),
//! };
//! let summary = generate("CIS_Ubuntu_Linux_22.04_LTS_Benchmark_v1.0.0.xlsx", &config)?;
//! println!("wrote {} documents", summary.documents_written);
//! # Ok::<(), cisdoc::Error>(())
//! ```
//!
//! ## Using the pipeline directly
//!
//! The normalization pipeline operates on plain strings and does not care
//! where the text came from:
//!
//! ```
//! use cisdoc::markdown::{normalize_lines, renumber_lists, tag_code_fences};
//!
//! let text = "1. first step\n1. second step";
//! let text = normalize_lines(text);
//! let text = tag_code_fences(&text)?;
//! let text = renumber_lists(&text);
//! assert_eq!(text, "1. first step.\n2. second step.");
//! # Ok::<(), cisdoc::Error>(())
//! ```

pub mod error;
pub mod generator;
pub mod markdown;
pub mod overview;
pub mod record;
pub mod workbook;

pub use error::{Error, Result};
pub use generator::{GenerationSummary, GeneratorConfig, generate};
pub use overview::assemble_overview;
pub use record::{BenchmarkRecord, Document, assemble_body};
pub use workbook::{Workbook, extract_benchmark_info};
