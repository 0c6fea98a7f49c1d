//! CSV ingest.
//!
//! Turns an uploaded CSV into a typed `Table`. Typing is decided per column,
//! the way a dataframe reader would:
//!   1. Missing-value tokens (`""`, `NA`, `NaN`, `null`, ...) become `Missing`.
//!   2. A column whose remaining cells are all booleans is Boolean.
//!   3. A column whose remaining cells are all integers is Integer.
//!   4. A column mixing integers and reals is promoted to Real.
//!   5. Anything else is Text, and every non-missing cell keeps its raw text.
//!
//! Header names are kept verbatim apart from a leading BOM. A text cell that
//! spells a missing token (`"NA"`, `"null"`, ...) reads back as `Missing`.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    table::{Table, Value},
};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const MISSING_TOKENS: [&str; 12] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ColumnKind {
    Empty,
    Boolean,
    Integer,
    Real,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Missing,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Raw(String),
}

/// Read a CSV file from disk.
pub fn load_csv(path: &Path) -> AnalyticsResult<Table> {
    let file = File::open(path)?;
    log::debug!("ingest: reading {}", path.display());
    read_csv(file)
}

/// Read CSV text (header row first) into a typed table.
pub fn read_csv<R: Read>(reader: R) -> AnalyticsResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header_name)
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != columns.len() {
            return Err(AnalyticsError::InvalidTable {
                row:    idx,
                reason: format!(
                    "expected {} fields, got {} (line {})",
                    columns.len(),
                    record.len(),
                    idx + 2
                ),
            });
        }
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|col| infer_kind(raw_rows.iter().map(|r| r[col].as_str())))
        .collect();

    let mut table = Table::new(columns)?;
    for raw in raw_rows {
        let values = raw
            .into_iter()
            .zip(kinds.iter())
            .map(|(cell, kind)| to_value(cell, *kind))
            .collect();
        table.push_row(values)?;
    }

    log::debug!(
        "ingest: {} rows x {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    // Other whitespace is part of the name, so exported tables read back intact.
    name.trim_start_matches('\u{feff}').to_string()
}

fn classify(raw: &str) -> Cell {
    if MISSING_TOKENS.contains(&raw) {
        return Cell::Missing;
    }
    match raw {
        "True" | "true" | "TRUE" => return Cell::Boolean(true),
        "False" | "false" | "FALSE" => return Cell::Boolean(false),
        _ => {}
    }
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Cell::Integer(i);
    }
    if let Ok(r) = trimmed.parse::<f64>() {
        return Cell::Real(r);
    }
    Cell::Raw(raw.to_string())
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Empty;
    for raw in cells {
        let cell_kind = match classify(raw) {
            Cell::Missing => continue,
            Cell::Boolean(_) => ColumnKind::Boolean,
            Cell::Integer(_) => ColumnKind::Integer,
            Cell::Real(_) => ColumnKind::Real,
            Cell::Raw(_) => return ColumnKind::Text,
        };
        kind = match (kind, cell_kind) {
            (ColumnKind::Empty, k) => k,
            (a, b) if a == b => a,
            (ColumnKind::Integer, ColumnKind::Real) | (ColumnKind::Real, ColumnKind::Integer) => {
                ColumnKind::Real
            }
            // Booleans mixed with numbers have no common type.
            _ => return ColumnKind::Text,
        };
    }
    kind
}

fn to_value(raw: String, kind: ColumnKind) -> Value {
    match (classify(&raw), kind) {
        (Cell::Missing, _) => Value::Missing,
        (_, ColumnKind::Text) => Value::Text(raw),
        (Cell::Boolean(b), _) => Value::Boolean(b),
        (Cell::Integer(i), ColumnKind::Real) => Value::Real(i as f64),
        (Cell::Integer(i), _) => Value::Integer(i),
        (Cell::Real(r), _) => Value::Real(r),
        (Cell::Raw(s), _) => Value::Text(s),
    }
}
