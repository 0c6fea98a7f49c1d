//! Export a table to CSV or JSON.
//!
//! CSV output re-reads into an equal `Table` through `ingest::read_csv`.
//! JSON output is a list of row objects keyed by column name.

use crate::{
    error::AnalyticsResult,
    table::{Table, Value},
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the table as CSV: header row, then one record per row.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> AnalyticsResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(table.columns())?;
    for row in table.rows() {
        out.write_record(row.values().iter().map(Value::to_string))?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_csv(table: &Table, path: &Path) -> AnalyticsResult<()> {
    let file = File::create(path)?;
    write_csv(table, file)?;
    log::debug!("export: wrote {} rows to {}", table.row_count(), path.display());
    Ok(())
}

/// Records-oriented JSON: `[{"col": value, ...}, ...]`.
pub fn to_json(table: &Table) -> serde_json::Value {
    let records = table
        .rows()
        .map(|row| {
            let object: serde_json::Map<String, serde_json::Value> = row
                .iter()
                .map(|(name, value)| (name.to_string(), json_cell(value)))
                .collect();
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(records)
}

pub fn write_json<W: Write>(table: &Table, writer: W) -> AnalyticsResult<()> {
    serde_json::to_writer_pretty(writer, &to_json(table))?;
    Ok(())
}

pub fn save_json(table: &Table, path: &Path) -> AnalyticsResult<()> {
    let file = File::create(path)?;
    write_json(table, file)?;
    log::debug!("export: wrote {} rows to {}", table.row_count(), path.display());
    Ok(())
}

fn json_cell(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(i) => serde_json::Value::from(*i),
        // Non-finite reals have no JSON form.
        Value::Real(r) => serde_json::Number::from_f64(*r)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Missing => serde_json::Value::Null,
    }
}
