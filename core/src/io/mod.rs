//! Table input/output.
//!
//! - CSV ingest with per-column cell typing (`ingest`)
//! - CSV and JSON (records) exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
