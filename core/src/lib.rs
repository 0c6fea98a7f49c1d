//! Churn analytics core.
//!
//! Pure building blocks behind the churn dashboard:
//!   - `summary`:      KPI statistics and the below-average subset of a table
//!   - `scoring`:      bounded churn-risk score and tier from customer features
//!   - `presentation`: tier to label, color band and retention actions
//!
//! Supporting modules hold the table model, CSV/JSON I/O, the exploration
//! histogram and the scoring configuration. Nothing here keeps state between
//! calls; callers own the `Table` and pass it where it is needed.

pub mod config;
pub mod error;
pub mod explore;
pub mod io;
pub mod presentation;
pub mod scoring;
pub mod summary;
pub mod table;
pub mod types;

pub use config::ScoringConfig;
pub use error::{AnalyticsError, AnalyticsResult};
pub use presentation::{present, present_with, ColorBand, PresentationPayload};
pub use scoring::{score, ChurnScorer, CustomerFeatures, RiskAssessment, RiskTier, Satisfaction};
pub use summary::{summarize, summarize_with, FilterColumn, TableSummary};
pub use table::{Table, Value};
