//! Salary dataset rows.
//!
//! Format:
//! - UTF-8, comma-separated, first line is a header and is always skipped
//! - column 1 is the position label, column 2 the gender label, column 3 the
//!   salary; column 0 (a row id) is ignored
//! - double-quoted fields with embedded commas are handled
//! - rows with fewer than 4 columns are dropped; rows whose salary does not
//!   parse are dropped with a warning

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{NnError, Result};

/// Gender label encoded as 0; anything else encodes as 1.
pub const MALE_LABEL: &str = "Masculino";

const MIN_COLUMNS: usize = 4;

/// One raw row of the salary dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub position: String,
    /// 0 for [`MALE_LABEL`], 1 otherwise.
    pub gender: u8,
    pub salary: f64,
}

impl Record {
    pub fn new(position: impl Into<String>, gender: u8, salary: f64) -> Self {
        Record {
            position: position.into(),
            gender,
            salary,
        }
    }
}

/// Reads and parses a dataset file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let records = parse_records(&text);
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses dataset text, skipping the header, short rows and malformed rows.
pub fn parse_records(text: &str) -> Vec<Record> {
    text.lines()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, line)| match parse_line(line, idx + 1) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping row: {e}");
                None
            }
        })
        .collect()
}

/// `Ok(None)` means the row is silently ignored (blank or too short).
fn parse_line(line: &str, line_no: usize) -> Result<Option<Record>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let cells = parse_csv_row(line);
    if cells.len() < MIN_COLUMNS {
        return Ok(None);
    }

    let position = cells[1].trim().to_string();
    let gender = if cells[2].trim().eq_ignore_ascii_case(MALE_LABEL) {
        0
    } else {
        1
    };
    let raw_salary = cells[3].trim();
    let salary = raw_salary
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite())
        .ok_or_else(|| NnError::MalformedRow {
            line: line_no,
            reason: format!("salary '{raw_salary}' is not a valid number"),
        })?;

    Ok(Some(Record {
        position,
        gender,
        salary,
    }))
}

/// Splits a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote inside quoted field.
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}
