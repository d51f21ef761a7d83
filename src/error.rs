//! Error types for cisdoc operations.

use thiserror::Error;

/// Errors that can occur while loading a benchmark workbook or generating docs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid workbook: {0}")]
    InvalidWorkbook(String),

    #[error("Missing required sheet: {0}")]
    MissingSheet(String),

    #[error("Benchmark filename does not follow the CIS naming convention: {0}")]
    InvalidFilename(String),

    #[error("Unclosed code fence in input text")]
    UnmatchedFence,
}

pub type Result<T> = std::result::Result<T, Error>;
