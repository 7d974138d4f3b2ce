//! Append-only results log.
//!
//! ```text
//! language,algorithm,n,rep,time_s
//! Rust,strassen,1024,1,3.2171
//! ```
//!
//! The header is written only when the file does not exist yet. Existing
//! content is never rewritten or deduplicated.

use std::fs::OpenOptions;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Column names of the results CSV, in order.
pub const RESULTS_HEADER: [&str; 5] = ["language", "algorithm", "n", "rep", "time_s"];

/// One timed repetition of one algorithm.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultRow {
    pub language: String,
    pub algorithm: String,
    pub n: usize,
    /// 1-based repetition index.
    pub rep: usize,
    pub time_s: f64,
}

impl ResultRow {
    pub fn new(
        language: impl Into<String>,
        algorithm: impl Into<String>,
        n: usize,
        rep: usize,
        time_s: f64,
    ) -> Self {
        Self {
            language: language.into(),
            algorithm: algorithm.into(),
            n,
            rep,
            time_s,
        }
    }
}

/// Appends `rows` to the CSV at `path`, creating it with a header line if needed.
pub fn append_results(path: impl AsRef<Path>, rows: &[ResultRow]) -> Result<()> {
    let path = path.as_ref();
    let exists = path.exists();
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| Error::io(path, err))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if !exists {
        writer
            .write_record(RESULTS_HEADER)
            .map_err(|err| Error::csv(path, err))?;
    }
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| Error::csv(path, err))?;
    }
    writer.flush().map_err(|err| Error::io(path, err))?;

    debug!(path = %path.display(), rows = rows.len(), created = !exists, "appended results");
    Ok(())
}
