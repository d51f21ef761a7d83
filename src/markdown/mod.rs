//! The Markdown normalization pipeline.
//!
//! Benchmark prose is written by many authors over many years and arrives
//! inconsistently styled. This module turns it into well-formed Markdown
//! through four pure, deterministic stages:
//!
//! - [`rewrite_section_headers`]: bolded section markers become level-3
//!   headings
//! - [`normalize_lines`]: per-line trimming, URL auto-linking, list-item
//!   punctuation, fence tracking
//! - [`tag_code_fences`]: language tags (`json`/`bash`) on every fence, with
//!   embedded JSON pretty-printed
//! - [`renumber_lists`]: runs of manually `1.`-numbered lines become properly
//!   incrementing sequences
//!
//! The stages must run in that order: renumbering assumes trimming has
//! finalized punctuation, and fence tagging assumes lines are already free of
//! artifacts that could look like fence boundaries. [`crate::record`]
//! orchestrates the full sequence per document.
//!
//! Every stage is a pure function over strings: no I/O, no shared state, safe
//! to fan out across documents.

mod classify;
mod fences;
mod headers;
mod normalize;
mod renumber;

pub use classify::{is_list_item, is_url};
pub use fences::{format_json_string, tag_code_fences};
pub use headers::rewrite_section_headers;
pub use normalize::normalize_lines;
pub use renumber::renumber_lists;
