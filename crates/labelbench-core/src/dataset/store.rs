//! Flat JSON persistence for the labeled dataset.
//!
//! The file is a write-once cache: it is generated when absent and never
//! regenerated, so paid generation calls happen at most once per dataset.

use super::Generator;
use crate::errors::BenchError;
use crate::model::LabeledExample;
use anyhow::Context;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Read an existing dataset. A missing file is [`BenchError::MissingInput`].
pub fn load_existing(path: &Path) -> anyhow::Result<Vec<LabeledExample>> {
    if !path.exists() {
        return Err(BenchError::MissingInput {
            path: path.to_path_buf(),
        }
        .into());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let examples: Vec<LabeledExample> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse dataset {}", path.display()))?;
    tracing::debug!(path = %path.display(), examples = examples.len(), "loaded dataset");
    Ok(examples)
}

/// Write the whole dataset as one snapshot (temp file + rename).
pub fn save(path: &Path, examples: &[LabeledExample]) -> anyhow::Result<()> {
    write_json_atomic(path, examples, "dataset")
}

/// Pretty JSON with a trailing newline, written to a sibling temp file and
/// renamed over `path`. Readers never observe a partial document.
pub(crate) fn write_json_atomic<T>(path: &Path, value: &T, what: &str) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    let body = serde_json::to_string_pretty(value)?;
    tmp.write_all(body.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {} {}", what, path.display()))?;
    Ok(())
}

/// Load `path` if it exists, otherwise generate every category, persist the
/// concatenated set and return it.
pub async fn load_or_create(
    path: &Path,
    generator: &Generator,
) -> anyhow::Result<Vec<LabeledExample>> {
    if path.exists() {
        tracing::info!(path = %path.display(), "dataset file already exists, skipping generation");
        return load_existing(path);
    }

    let mut examples = Vec::new();
    for label in generator.categories().labels() {
        let texts = generator
            .generate(label, generator.per_category())
            .await
            .with_context(|| format!("generation failed for category {}", label))?;
        examples.extend(
            texts
                .into_iter()
                .map(|text| LabeledExample::new(text, label.clone())),
        );
    }
    tracing::info!(total = examples.len(), "generated training examples");

    save(path, &examples)?;
    Ok(examples)
}
