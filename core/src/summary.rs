//! Tabular summary — KPI statistics over an uploaded table.
//!
//! For every numeric column this computes sum, mean, count, min and max over
//! the non-missing cells, then selects the rows that sit strictly below the
//! filter column's mean.
//!
//! RULE: a column is numeric when every non-missing cell is an Integer or a
//! Real. Booleans and text disqualify it. An all-missing column is numeric
//! but degenerate: its mean is `None` and a warning is recorded. Non-finite
//! reals (NaN, infinities) count as missing, in the stats and in the subset.
//!
//! The default filter column is the first numeric column in declared column
//! order. That choice is an arbitrary tie-break, so callers can name a
//! different column through `FilterColumn::Named`.

use crate::{
    table::{Table, Value},
    types::ColumnName,
};
use serde::{Deserialize, Serialize};

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub sum:   f64,
    /// `None` when the column has no non-missing values.
    pub mean:  Option<f64>,
    pub count: usize,
    pub min:   Option<f64>,
    pub max:   Option<f64>,
}

impl ColumnStats {
    pub fn is_degenerate(&self) -> bool {
        self.mean.is_none()
    }
}

/// Which column drives the below-average subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "column")]
pub enum FilterColumn {
    #[default]
    FirstNumeric,
    Named(ColumnName),
}

/// Non-fatal conditions found while summarizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryWarning {
    /// Numeric column with zero non-missing values; mean is undefined.
    DegenerateColumn { column: ColumnName },
    /// The requested filter column is absent or not numeric.
    FilterColumnUnavailable { column: ColumnName },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub row_count:            usize,
    pub column_count:         usize,
    /// Numeric columns in declared order.
    pub numeric_column_stats: Vec<(ColumnName, ColumnStats)>,
    pub filter_column:        Option<ColumnName>,
    pub below_average_subset: Table,
    pub warnings:             Vec<SummaryWarning>,
}

impl TableSummary {
    pub fn stats(&self, column: &str) -> Option<&ColumnStats> {
        self.numeric_column_stats
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, stats)| stats)
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.numeric_column_stats.iter().map(|(name, _)| name.as_str())
    }
}

// ── Operations ───────────────────────────────────────────────────────────────

/// Summarize with the default filter column (first numeric column).
pub fn summarize(table: &Table) -> TableSummary {
    summarize_with(table, &FilterColumn::FirstNumeric)
}

pub fn summarize_with(table: &Table, filter: &FilterColumn) -> TableSummary {
    let mut warnings = Vec::new();
    let mut numeric_column_stats = Vec::new();

    // A zero-row table has no typed cells, so no column qualifies as numeric.
    let columns = if table.is_empty() { &[][..] } else { table.columns() };

    for name in columns {
        let Ok(values) = table.column_values(name) else { continue };
        let Some(stats) = column_stats(&values) else { continue };

        if stats.is_degenerate() {
            log::warn!("summary: column '{name}' has no values; mean undefined");
            warnings.push(SummaryWarning::DegenerateColumn { column: name.clone() });
        }
        numeric_column_stats.push((name.clone(), stats));
    }

    let filter_column = match filter {
        FilterColumn::FirstNumeric => numeric_column_stats.first().map(|(n, _)| n.clone()),
        FilterColumn::Named(name) => {
            if numeric_column_stats.iter().any(|(n, _)| n == name) {
                Some(name.clone())
            } else {
                warnings.push(SummaryWarning::FilterColumnUnavailable { column: name.clone() });
                None
            }
        }
    };

    let mean = filter_column.as_deref().and_then(|column| {
        numeric_column_stats
            .iter()
            .find(|(n, _)| n == column)
            .and_then(|(_, s)| s.mean)
    });

    let below_average_subset = match (filter_column.as_deref(), mean) {
        (Some(column), Some(mean)) => table.filter_rows(|row| {
            row.get(column)
                .and_then(Value::as_f64)
                .is_some_and(|v| v.is_finite() && v < mean)
        }),
        _ => table.empty_like(),
    };

    log::debug!(
        "summary: {} rows, {} numeric columns, {} below average on {:?}",
        table.row_count(),
        numeric_column_stats.len(),
        below_average_subset.row_count(),
        filter_column,
    );

    TableSummary {
        row_count: table.row_count(),
        column_count: table.column_count(),
        numeric_column_stats,
        filter_column,
        below_average_subset,
        warnings,
    }
}

/// Stats for a column, or `None` if the column is not numeric.
fn column_stats(values: &[&Value]) -> Option<ColumnStats> {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    for value in values {
        if value.is_missing() {
            continue;
        }
        let v = value.as_f64()?;
        if !v.is_finite() {
            continue;
        }
        sum += v;
        count += 1;
        min = Some(min.map_or(v, |m| m.min(v)));
        max = Some(max.map_or(v, |m| m.max(v)));
    }

    let mean = (count > 0).then(|| sum / count as f64);
    Some(ColumnStats { sum, mean, count, min, max })
}
