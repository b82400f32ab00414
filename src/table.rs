//! Minimal tabular input model.
//!
//! The pipeline consumes a [`Table`]: named columns over rows of string
//! cells. How the table got into memory is the host's business; the bundled
//! loader reads RFC 4180 CSV (quoted fields, escaped quotes, CRLF line
//! endings), which is how validation exports arrive in practice.

use std::fs;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// A rectangular-ish grid of string cells with named columns.
///
/// Rows may be ragged; [`Table::cell`] returns `None` past the end of a
/// short row, and the extractor treats that like any other missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a CSV file with the given field delimiter.
    pub fn from_csv_path(path: &Path, delimiter: char) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_csv_str(&text, delimiter)
    }

    /// Parses CSV text. The first record is the header row; header names are
    /// trimmed, cell contents are kept verbatim.
    pub fn from_csv_str(text: &str, delimiter: char) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = parse_records(text, delimiter)?;
        // A blank line parses as a single empty field; drop those.
        records.retain(|r| !(r.len() == 1 && r[0].is_empty()));

        if records.is_empty() {
            return Ok(Self::new(Vec::new(), Vec::new()));
        }
        let headers = records
            .remove(0)
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        Ok(Self::new(headers, records))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Index of the named column, or `None` if the header is absent.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (row, column), or `None` when either index is out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }
}

/// RFC 4180 state machine. Quoted fields may contain the delimiter, line
/// breaks, and doubled quotes; a quote inside an unquoted field is literal.
fn parse_records(text: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                '\r' => {
                    // CRLF: let the '\n' close the record. A bare '\r' is data.
                    if chars.peek() != Some(&'\n') {
                        field.push('\r');
                    }
                }
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                    line += 1;
                }
                c if c == delimiter => record.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(AnalysisError::CsvParse {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}
