//! Grouped histogram data for the exploration page.
//!
//! Produces one bar per distinct `(x, color)` pair in first-appearance order.
//! Bar height is a row count, or the sum of a numeric `y` column when one is
//! given. Drawing the bars is the caller's job.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    table::{Table, Value},
    types::ColumnName,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramRequest {
    pub x:     ColumnName,
    pub y:     Option<ColumnName>,
    pub color: Option<ColumnName>,
}

impl HistogramRequest {
    pub fn count_of(x: impl Into<ColumnName>) -> Self {
        Self { x: x.into(), y: None, color: None }
    }

    pub fn sum_of(x: impl Into<ColumnName>, y: impl Into<ColumnName>) -> Self {
        Self { x: x.into(), y: Some(y.into()), color: None }
    }

    pub fn colored_by(mut self, color: impl Into<ColumnName>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBar {
    pub x:     String,
    pub color: Option<String>,
    pub value: f64,
}

pub fn grouped_histogram(table: &Table, request: &HistogramRequest) -> AnalyticsResult<Vec<HistogramBar>> {
    let require = |name: &str| -> AnalyticsResult<()> {
        table
            .column_index(name)
            .map(|_| ())
            .ok_or_else(|| AnalyticsError::UnknownColumn { name: name.to_string() })
    };

    require(request.x.as_str())?;
    if let Some(color) = request.color.as_deref() {
        require(color)?;
    }
    if let Some(y) = &request.y {
        let values = table.column_values(y)?;
        if values.iter().any(|v| !v.is_missing() && !v.is_numeric()) {
            return Err(AnalyticsError::NonNumericColumn { name: y.clone() });
        }
    }

    let mut bars: Vec<HistogramBar> = Vec::new();
    for row in table.rows() {
        let x = row.get(&request.x).map(Value::to_string).unwrap_or_default();
        let color = request
            .color
            .as_deref()
            .map(|c| row.get(c).map(Value::to_string).unwrap_or_default());

        let height = match request.y.as_deref() {
            None => 1.0,
            Some(y) => row.get(y).and_then(Value::as_f64).unwrap_or(0.0),
        };

        match bars.iter_mut().find(|b| b.x == x && b.color == color) {
            Some(bar) => bar.value += height,
            None => bars.push(HistogramBar { x, color, value: height }),
        }
    }

    log::debug!("explore: {} bars for x='{}'", bars.len(), request.x);
    Ok(bars)
}
