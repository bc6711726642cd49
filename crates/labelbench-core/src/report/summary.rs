//! `summary.json`: machine-readable results of a comparison run.

use crate::dataset::store::write_json_atomic;
use crate::engine::EvalReport;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever a field changes meaning or is removed.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub schema_version: u32,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub dataset: String,
    pub examples: usize,
    pub provider: String,
    pub classification_model: String,
    pub results: Vec<EvalReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_secs: Option<f64>,
}

impl Summary {
    pub fn new(
        dataset: &Path,
        examples: usize,
        provider: impl Into<String>,
        classification_model: impl Into<String>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: chrono::Utc::now(),
            dataset: dataset.display().to_string(),
            examples,
            provider: provider.into(),
            classification_model: classification_model.into(),
            results: Vec::new(),
            optimization_secs: None,
        }
    }

    pub fn with_results(mut self, results: Vec<EvalReport>) -> Self {
        self.results = results;
        self
    }

    pub fn with_optimization_secs(mut self, secs: Option<f64>) -> Self {
        self.optimization_secs = secs;
        self
    }

    /// Highest-accuracy result; ties keep the earliest entry.
    pub fn best(&self) -> Option<&EvalReport> {
        self.results.iter().fold(None, |best, r| match best {
            Some(b) if b.accuracy >= r.accuracy => Some(b),
            _ => Some(r),
        })
    }
}

pub fn write_summary(summary: &Summary, path: &Path) -> anyhow::Result<()> {
    write_json_atomic(path, summary, "summary")
}
