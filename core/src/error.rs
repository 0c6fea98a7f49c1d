use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid table at row {row}: {reason}")]
    InvalidTable { row: usize, reason: String },

    #[error("Duplicate column '{name}'")]
    DuplicateColumn { name: String },

    #[error("Column '{name}' not found")]
    UnknownColumn { name: String },

    #[error("Column '{name}' is not numeric")]
    NonNumericColumn { name: String },

    #[error("Invalid scoring config: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
