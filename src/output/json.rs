//! JSON result files
//!
//! Writes `<results-dir>/<seed host>.json`. Every mapping is a `BTreeMap`, so
//! keys come out sorted.

use crate::output::traits::{result_file_stem, OutputResult, ResultWriter};
use crate::output::CrawlResult;
use std::fs;
use std::path::PathBuf;

/// Writes results as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonWriter {
    results_dir: PathBuf,
}

impl JsonWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Path the result for `seed` is written to
    pub fn path_for(&self, seed: &str) -> PathBuf {
        self.results_dir
            .join(format!("{}.json", result_file_stem(seed)))
    }
}

impl ResultWriter for JsonWriter {
    fn write(&self, result: &CrawlResult) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.results_dir)?;

        let path = self.path_for(&result.seed);
        let json = serde_json::to_string_pretty(result)?;
        fs::write(&path, json)?;

        tracing::info!("Wrote crawl result to {}", path.display());
        Ok(path)
    }
}
