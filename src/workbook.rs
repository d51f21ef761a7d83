//! Benchmark workbook loading.
//!
//! An XLSX file is a ZIP of XML parts. This module reads the handful of parts
//! the generator needs: the sheet index (`xl/workbook.xml` plus its
//! relationships file), the shared strings table, and individual worksheets.
//! Cells come back as `Option<String>` in row-major order, with `None` for
//! blank cells, which is all the pipeline requires.

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// The sheet that holds one row per recommendation.
pub const PROFILES_SHEET: &str = "Combined Profiles";

/// A row of cells; `None` marks a blank cell.
pub type Row = Vec<Option<String>>;

// Benchmark workbooks are named either with underscores
// (CIS_Ubuntu_Linux_22.04_LTS_Benchmark_v1.0.0.xlsx) or with spaces.
static UNDERSCORE_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CIS_(.+)_Benchmark_v(\d+\.\d+\.\d+)").expect("benchmark filename pattern")
});
static SPACE_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CIS (.+) Benchmark v(\d+\.\d+\.\d+)").expect("benchmark filename pattern")
});

/// Extract the benchmark name and version from a workbook filename.
///
/// # Examples
///
/// ```
/// use cisdoc::workbook::extract_benchmark_info;
///
/// let (name, version) =
///     extract_benchmark_info("CIS_Ubuntu_Linux_22.04_LTS_Benchmark_v1.0.0.xlsx").unwrap();
/// assert_eq!(name, "Ubuntu Linux 22.04 LTS");
/// assert_eq!(version, "1.0.0");
/// ```
pub fn extract_benchmark_info(filename: &str) -> Option<(String, String)> {
    if let Some(caps) = UNDERSCORE_FORM.captures(filename) {
        return Some((caps[1].replace('_', " "), caps[2].to_string()));
    }
    SPACE_FORM
        .captures(filename)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// A loaded XLSX workbook.
pub struct Workbook<R: Read + Seek> {
    archive: ZipArchive<R>,
    /// Sheet name -> archive path, in workbook order.
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
}

impl Workbook<std::fs::File> {
    /// Open a workbook from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Workbook<R> {
    /// Read a workbook from any [`Read`] + [`Seek`] source.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let rels_xml = read_archive_file(&mut archive, "xl/_rels/workbook.xml.rels")?;
        let rels = parse_relationships(&rels_xml)?;

        let workbook_xml = read_archive_file(&mut archive, "xl/workbook.xml")?;
        let sheets = parse_sheet_index(&workbook_xml, &rels)?;

        // Shared strings are optional; a workbook with only inline or numeric
        // cells has no such part.
        let shared_strings = match read_archive_file(&mut archive, "xl/sharedStrings.xml") {
            Ok(xml) => parse_shared_strings(&xml)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            archive,
            sheets,
            shared_strings,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The glossary sheet, when present: the first sheet whose name contains
    /// `overview` or `glossary` (case-insensitive).
    pub fn glossary_sheet_name(&self) -> Option<String> {
        self.sheets
            .iter()
            .map(|(name, _)| name)
            .find(|name| {
                let lower = name.to_ascii_lowercase();
                lower.contains("overview") || lower.contains("glossary")
            })
            .cloned()
    }

    /// All rows of a sheet, blank cells as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSheet`] when the workbook has no sheet with
    /// that name.
    pub fn rows(&mut self, sheet_name: &str) -> Result<Vec<Row>> {
        let path = self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, path)| path.clone())
            .ok_or_else(|| Error::MissingSheet(sheet_name.to_string()))?;

        let xml = read_archive_file(&mut self.archive, &path)?;
        parse_worksheet(&xml, &self.shared_strings)
    }
}

fn read_archive_file<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive.by_name(path)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    let bytes = strip_bom(&contents);
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Strip UTF-8 BOM (byte order mark) if present
fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Extract local name from potentially namespaced XML name
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

fn resolve_entity(entity: &str) -> &'static str {
    match entity {
        "apos" => "'",
        "quot" => "\"",
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        _ => "",
    }
}

/// Parse `xl/_rels/workbook.xml.rels` into a relationship-id -> archive-path
/// map.
fn parse_relationships(content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut rels = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut id = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8(attr.value.to_vec())?,
                        b"Target" => target = String::from_utf8(attr.value.to_vec())?,
                        _ => {}
                    }
                }
                if !id.is_empty() && !target.is_empty() {
                    // Targets are relative to xl/ unless they are absolute.
                    let path = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("xl/{target}"),
                    };
                    rels.insert(id, path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    Ok(rels)
}

/// Parse `xl/workbook.xml` into (sheet name, archive path) pairs in workbook
/// order.
fn parse_sheet_index(
    content: &str,
    rels: &HashMap<String, String>,
) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut sheets = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if local_name(e.name().as_ref()) == b"sheet" =>
            {
                let mut name = String::new();
                let mut rel_id = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => name = String::from_utf8(attr.value.to_vec())?,
                        b"r:id" | b"id" => rel_id = String::from_utf8(attr.value.to_vec())?,
                        _ => {}
                    }
                }
                if let Some(path) = rels.get(&rel_id) {
                    sheets.push((name, path.clone()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    if sheets.is_empty() {
        return Err(Error::InvalidWorkbook(
            "workbook contains no sheets".to_string(),
        ));
    }

    Ok(sheets)
}

/// Parse `xl/sharedStrings.xml` into the shared strings table.
///
/// Rich-text runs inside a single `<si>` are concatenated.
fn parse_shared_strings(content: &str) -> Result<Vec<String>> {
    // Text is only captured inside <t>, so inter-element whitespace never
    // leaks in; trimming would eat significant spaces in rich-text runs.
    let mut reader = Reader::from_str(content);

    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_t = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"si" => current.clear(),
                b"t" => in_t = true,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => {
                current.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) if in_t => {
                current.push_str(resolve_entity(&String::from_utf8_lossy(e.as_ref())));
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"t" => in_t = false,
                b"si" => strings.push(current.clone()),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    Ok(strings)
}

/// Convert a cell reference like `B3` to a zero-based column index.
fn column_index(cell_ref: &str) -> usize {
    let mut index = 0usize;
    for c in cell_ref.chars().take_while(char::is_ascii_alphabetic) {
        index = index * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    index.saturating_sub(1)
}

fn set_cell(row: &mut Row, col: usize, value: Option<String>) {
    if row.len() <= col {
        row.resize(col + 1, None);
    }
    row[col] = value;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    SharedString,
    Other,
}

/// Parse one worksheet part into rows of optional cell strings.
fn parse_worksheet(content: &str, shared_strings: &[String]) -> Result<Vec<Row>> {
    // No trim_text: inline-string cells may carry significant whitespace.
    let mut reader = Reader::from_str(content);

    let mut rows: Vec<Row> = Vec::new();
    let mut current_row: Row = Vec::new();

    let mut cell_col = 0usize;
    let mut next_col = 0usize;
    let mut cell_type = CellType::Other;
    let mut in_value = false;
    let mut value = String::new();
    let mut has_value = false;

    let start_cell = |e: &quick_xml::events::BytesStart<'_>,
                          next_col: usize|
     -> Result<(usize, CellType)> {
        let mut col = next_col;
        let mut ty = CellType::Other;
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => col = column_index(&String::from_utf8(attr.value.to_vec())?),
                b"t" if attr.value.as_ref() == b"s" => ty = CellType::SharedString,
                _ => {}
            }
        }
        Ok((col, ty))
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"row" => {
                    current_row = Vec::new();
                    next_col = 0;
                }
                b"c" => {
                    (cell_col, cell_type) = start_cell(&e, next_col)?;
                    value.clear();
                    has_value = false;
                }
                // <v> holds numeric/shared-string values, <t> inline text.
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match local_name(e.name().as_ref()) {
                b"c" => {
                    let (col, _) = start_cell(&e, next_col)?;
                    set_cell(&mut current_row, col, None);
                    next_col = col + 1;
                }
                // Keep empty rows so adjacent-row lookups stay aligned.
                b"row" => rows.push(Vec::new()),
                _ => {}
            },
            Ok(Event::Text(e)) if in_value => {
                value.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) if in_value => {
                value.push_str(resolve_entity(&String::from_utf8_lossy(e.as_ref())));
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"v" | b"t" => {
                    in_value = false;
                    has_value = true;
                }
                b"c" => {
                    let resolved = if !has_value {
                        None
                    } else if cell_type == CellType::SharedString {
                        value
                            .trim()
                            .parse::<usize>()
                            .ok()
                            .and_then(|i| shared_strings.get(i))
                            .cloned()
                    } else {
                        Some(value.clone())
                    };
                    let resolved = resolved.filter(|v| !v.trim().is_empty());
                    set_cell(&mut current_row, cell_col, resolved);
                    next_col = cell_col + 1;
                }
                b"row" => rows.push(std::mem::take(&mut current_row)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    Ok(rows)
}
