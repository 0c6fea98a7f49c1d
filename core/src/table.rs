//! In-memory table of uploaded customer data.
//!
//! A `Table` is an ordered list of named columns and an ordered list of
//! rows, each row holding exactly one `Value` per column. It is built once
//! (by `io::ingest` or by hand), then read-only for the rest of an analysis.
//!
//! RULE: every row has the same column set. The constructors enforce this;
//! nothing downstream re-checks it.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    types::ColumnName,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ── Cell values ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    /// Numeric view of the cell. `None` for text, booleans and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            // NaN is a gap, written like Missing.
            Value::Real(r) if r.is_nan() => Ok(()),
            Value::Real(r) => {
                // Keep a fractional part on integral reals so a re-read
                // types the cell as Real again.
                let s = r.to_string();
                if !r.is_finite() || s.contains(['.', 'e', 'E']) {
                    write!(f, "{s}")
                } else {
                    write!(f, "{s}.0")
                }
            }
            Value::Text(s) => write!(f, "{s}"),
            Value::Boolean(true) => write!(f, "True"),
            Value::Boolean(false) => write!(f, "False"),
            Value::Missing => Ok(()),
        }
    }
}

// ── Rows ─────────────────────────────────────────────────────────────────────

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [ColumnName],
    values:  &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.values[idx])
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

// ── Table ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<ColumnName>,
    rows:    Vec<Vec<Value>>,
}

impl Table {
    /// An empty table with the given column order.
    pub fn new<I, S>(columns: I) -> AnalyticsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        let columns: Vec<ColumnName> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(AnalyticsError::DuplicateColumn { name: name.clone() });
            }
        }
        Ok(Self { columns, rows: Vec::new() })
    }

    /// Append a row given in declared column order.
    pub fn push_row(&mut self, values: Vec<Value>) -> AnalyticsResult<()> {
        if values.len() != self.columns.len() {
            return Err(AnalyticsError::InvalidTable {
                row:    self.rows.len(),
                reason: format!(
                    "expected {} values, got {}",
                    self.columns.len(),
                    values.len()
                ),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    /// Build a table from rows given as `(column, value)` pairs.
    ///
    /// The first row fixes the declared column order. Later rows may list
    /// their pairs in any order but must carry exactly the same column set.
    pub fn from_records<R, S>(records: R) -> AnalyticsResult<Self>
    where
        R: IntoIterator<Item = Vec<(S, Value)>>,
        S: Into<ColumnName>,
    {
        let mut records = records.into_iter();
        let Some(first) = records.next() else {
            return Ok(Self::default());
        };

        let (columns, values): (Vec<ColumnName>, Vec<Value>) =
            first.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        let mut table = Self::new(columns)?;
        table.push_row(values)?;

        for record in records {
            let row = table.rows.len();
            if record.len() != table.columns.len() {
                return Err(AnalyticsError::InvalidTable {
                    row,
                    reason: format!(
                        "expected {} columns, got {}",
                        table.columns.len(),
                        record.len()
                    ),
                });
            }

            let mut slots: Vec<Option<Value>> = vec![None; table.columns.len()];
            for (name, value) in record {
                let name: ColumnName = name.into();
                let idx = table.column_index(&name).ok_or_else(|| {
                    AnalyticsError::InvalidTable {
                        row,
                        reason: format!("unexpected column '{name}'"),
                    }
                })?;
                if slots[idx].replace(value).is_some() {
                    return Err(AnalyticsError::InvalidTable {
                        row,
                        reason: format!("column '{name}' given twice"),
                    });
                }
            }

            // Arity matched and no slot was filled twice, so every slot is set.
            table.rows.push(slots.into_iter().map(|v| v.unwrap_or(Value::Missing)).collect());
        }

        Ok(table)
    }

    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, idx: usize) -> Option<RowRef<'_>> {
        self.rows.get(idx).map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> + '_ {
        self.rows.iter().map(move |values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    /// All values of one column in row order.
    pub fn column_values(&self, name: &str) -> AnalyticsResult<Vec<&Value>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| AnalyticsError::UnknownColumn { name: name.to_string() })?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// New table with the same columns and only the rows matching `keep`.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(RowRef<'_>) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|values| {
                keep(RowRef {
                    columns: &self.columns,
                    values,
                })
            })
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Same columns, no rows.
    pub fn empty_like(&self) -> Table {
        Table {
            columns: self.columns.clone(),
            rows:    Vec::new(),
        }
    }
}
