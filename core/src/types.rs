//! Shared primitive types used across the analytics core.

/// A column name. Unique within a table.
pub type ColumnName = String;

/// A churn risk score on the 0–100 scale.
pub type Score = f64;

/// Lower bound of the score scale.
pub const SCORE_MIN: Score = 0.0;

/// Upper bound of the score scale.
pub const SCORE_MAX: Score = 100.0;
