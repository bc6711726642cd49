//! Run configuration.
//!
//! A [`BenchConfig`] is built once at startup (defaults, optionally a YAML
//! file, then CLI overrides) and passed by reference into the generator,
//! classifiers and evaluator. Nothing in the core reads ambient globals.

use crate::errors::BenchError;
use crate::model::CategorySet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATASET_PATH: &str = "labeled_event_examples.json";
pub const DEFAULT_PROGRAM_PATH: &str = "optimized_classifier.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    #[serde(default)]
    pub categories: CategorySet,
    #[serde(default = "default_dataset_path")]
    pub dataset: PathBuf,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub classification: ClassificationSettings,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            categories: CategorySet::default(),
            dataset: default_dataset_path(),
            generation: GenerationSettings::default(),
            classification: ClassificationSettings::default(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATASET_PATH)
}

/// Sampling settings for synthetic data. Temperature stays non-zero so the
/// generated examples are diverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationSettings {
    #[serde(default = "default_generation_model")]
    pub model: String,
    #[serde(default = "default_generation_temperature")]
    pub temperature: f32,
    #[serde(default = "default_generation_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_per_category")]
    pub per_category: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            temperature: default_generation_temperature(),
            max_tokens: default_generation_max_tokens(),
            per_category: default_per_category(),
        }
    }
}

fn default_generation_model() -> String {
    "gpt-4o".to_string()
}
fn default_generation_temperature() -> f32 {
    0.7
}
fn default_generation_max_tokens() -> u32 {
    300
}
fn default_per_category() -> usize {
    15
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationSettings {
    #[serde(default = "default_classification_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_classification_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            model: default_classification_model(),
            temperature: 0.0,
            max_tokens: default_classification_max_tokens(),
        }
    }
}

fn default_classification_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_classification_max_tokens() -> u32 {
    50
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.generation.per_category == 0 {
            return Err(BenchError::Config(
                "generation.per_category must be > 0".into(),
            ));
        }
        if self.generation.max_tokens == 0 || self.classification.max_tokens == 0 {
            return Err(BenchError::Config("max_tokens must be > 0".into()));
        }
        let generation = self.generation.temperature;
        if !(generation > 0.0 && generation <= 2.0) {
            return Err(BenchError::Config(
                "generation.temperature must be within (0.0, 2.0]".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.classification.temperature) {
            return Err(BenchError::Config(
                "classification.temperature must be within [0.0, 2.0]".into(),
            ));
        }
        Ok(())
    }
}

/// Parse a YAML config; missing sections fall back to defaults.
pub fn parse_config(yaml: &str) -> anyhow::Result<BenchConfig> {
    let cfg: BenchConfig = if yaml.trim().is_empty() {
        BenchConfig::default()
    } else {
        serde_yaml::from_str(yaml)
            .map_err(|e| BenchError::Config(format!("failed to parse yaml: {}", e)))?
    };
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: &Path) -> anyhow::Result<BenchConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        BenchError::Config(format!(
            "failed to read config {}: {}",
            path.display(),
            e
        ))
    })?;
    let cfg = parse_config(&raw)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, BenchConfig::default());
        assert_eq!(cfg.generation.model, "gpt-4o");
        assert_eq!(cfg.generation.temperature, 0.7);
        assert_eq!(cfg.generation.max_tokens, 300);
        assert_eq!(cfg.generation.per_category, 15);
        assert_eq!(cfg.classification.model, "gpt-4o-mini");
        assert_eq!(cfg.classification.temperature, 0.0);
        assert_eq!(cfg.classification.max_tokens, 50);
    }

    #[test]
    fn partial_yaml_overrides_only_given_fields() {
        let cfg = parse_config(
            "categories: [Sports, Music, Film, Art]\ngeneration:\n  per_category: 3\nclassification:\n  model: local-small\n",
        )
        .unwrap();
        assert_eq!(cfg.categories.labels(), &["Sports", "Music", "Film", "Art"]);
        assert_eq!(cfg.generation.per_category, 3);
        assert_eq!(cfg.generation.model, "gpt-4o");
        assert_eq!(cfg.classification.model, "local-small");
        assert_eq!(cfg.classification.max_tokens, 50);
    }

    #[test]
    fn rejects_duplicate_categories_and_zero_count() {
        assert!(parse_config("categories: [Wars, Wars]\n").is_err());
        let err = parse_config("generation:\n  per_category: 0\n").unwrap_err();
        assert!(err.to_string().contains("per_category"));
    }

    #[test]
    fn rejects_category_sets_that_are_not_four_labels() {
        let err = parse_config("categories: [Sports, Music]\n").unwrap_err();
        assert_eq!(BenchError::kind_of(&err), "config");
        assert!(err.to_string().contains("exactly 4 labels"), "{err}");
        assert!(parse_config("categories: [A, B, C, D, E]\n").is_err());
    }

    #[test]
    fn generation_temperature_must_be_positive() {
        let err = parse_config("generation:\n  temperature: 0.0\n").unwrap_err();
        assert!(err.to_string().contains("generation.temperature"), "{err}");
        assert!(parse_config("generation:\n  temperature: 2.5\n").is_err());
        assert!(parse_config("generation:\n  temperature: 0.1\n").is_ok());

        let cfg = parse_config("classification:\n  temperature: 0.0\n").unwrap();
        assert_eq!(cfg.classification.temperature, 0.0);
        assert!(parse_config("classification:\n  temperature: -0.1\n").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_config("temperature: 0.3\n").is_err());
    }
}
