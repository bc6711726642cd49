//! Signature-style classifier whose prompt is data.
//!
//! A [`ProgramState`] holds the instructions, the reasoning strategy and any
//! few-shot demos. It is what an [`Optimizer`](super::optimizer::Optimizer)
//! produces and what gets saved as the optimized-classifier artifact.

use super::extract::LabelExtractor;
use super::{Classifier, PromptContext};
use crate::dataset::store::write_json_atomic;
use crate::errors::BenchError;
use crate::model::LabeledExample;
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ARTIFACT_VERSION: u32 = 1;

pub const DEFAULT_INSTRUCTIONS: &str =
    "Categorize the historical event into one of the allowed categories.";

const INPUT_FIELD: &str = "Event";
const OUTPUT_FIELD: &str = "Category";
const REASONING_FIELD: &str = "Reasoning";
const REASONING_PREFIX: &str = "Let's think step by step in order to";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStrategy {
    Predict,
    ChainOfThought,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramState {
    pub version: u32,
    pub strategy: ProgramStrategy,
    pub instructions: String,
    #[serde(default)]
    pub demos: Vec<LabeledExample>,
}

impl ProgramState {
    pub fn new(strategy: ProgramStrategy) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            strategy,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            demos: Vec::new(),
        }
    }

    pub fn predict() -> Self {
        Self::new(ProgramStrategy::Predict)
    }

    pub fn chain_of_thought() -> Self {
        Self::new(ProgramStrategy::ChainOfThought)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Err(BenchError::MissingInput {
                path: path.to_path_buf(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read program {}", path.display()))?;
        let state: ProgramState = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse program {}", path.display()))?;
        if state.version != ARTIFACT_VERSION {
            return Err(BenchError::UnsupportedArtifact {
                found: state.version,
                expected: ARTIFACT_VERSION,
            }
            .into());
        }
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        write_json_atomic(path, self, "program")
    }

    pub(crate) fn render(&self, labels: &str, text: &str) -> String {
        let cot = self.strategy == ProgramStrategy::ChainOfThought;
        let mut out = String::new();
        out.push_str(self.instructions.trim());
        out.push_str("\n\nAllowed categories: ");
        out.push_str(labels);
        out.push_str("\n\n---\n\nFollow the following format.\n\n");
        out.push_str(&format!("{}: Historical event description\n", INPUT_FIELD));
        if cot {
            out.push_str(&format!(
                "{}: {} ${{produce the {}}}. We ...\n",
                REASONING_FIELD,
                REASONING_PREFIX,
                OUTPUT_FIELD.to_lowercase()
            ));
        }
        out.push_str(&format!("{}: one of: {}\n", OUTPUT_FIELD, labels));

        for demo in &self.demos {
            out.push_str("\n---\n\n");
            out.push_str(&format!("{}: {}\n", INPUT_FIELD, demo.text));
            out.push_str(&format!("{}: {}\n", OUTPUT_FIELD, demo.category));
        }

        out.push_str("\n---\n\n");
        out.push_str(&format!("{}: {}\n", INPUT_FIELD, text));
        if cot {
            out.push_str(&format!("{}: {}", REASONING_FIELD, REASONING_PREFIX));
        } else {
            out.push_str(&format!("{}:", OUTPUT_FIELD));
        }
        out
    }
}

/// Runs a [`ProgramState`] against the completion service.
///
/// Unlike the reasoned prompt there is no default label: a reply without a
/// recognizable category is an error and counts as a miss.
pub struct ProgramClassifier {
    name: String,
    ctx: PromptContext,
    state: ProgramState,
    extractor: LabelExtractor,
}

impl ProgramClassifier {
    pub fn new(name: impl Into<String>, ctx: PromptContext, state: ProgramState) -> Self {
        Self {
            name: name.into(),
            ctx,
            state,
            extractor: LabelExtractor::program("category"),
        }
    }
}

#[async_trait]
impl Classifier for ProgramClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn classify(&self, text: &str) -> anyhow::Result<String> {
        let prompt = self.state.render(&self.ctx.categories.joined(), text);
        let reply = self.ctx.ask(prompt).await?;
        let (label, via) = self
            .extractor
            .extract(&reply, &self.ctx.categories)
            .ok_or_else(|| BenchError::UnparseableReply {
                reply: reply.clone(),
            })?;
        tracing::trace!(strategy = via, label = %label, "program label extracted");
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassificationSettings;
    use crate::model::CategorySet;
    use crate::providers::llm::fake::FakeClient;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn ctx(client: Arc<FakeClient>) -> PromptContext {
        PromptContext::new(
            client,
            ClassificationSettings::default(),
            CategorySet::default(),
        )
    }

    #[test]
    fn predict_prompt_ends_with_output_field_and_includes_demos() {
        let mut state = ProgramState::predict();
        state.demos = vec![LabeledExample::new("Battle of Agincourt", "Wars")];
        let p = state.render("Wars, Politics", "Moon landing");
        assert!(p.starts_with(DEFAULT_INSTRUCTIONS));
        assert!(p.contains("Event: Battle of Agincourt\nCategory: Wars\n"));
        assert!(p.ends_with("Event: Moon landing\nCategory:"));
        assert!(!p.contains("Reasoning"));
    }

    #[test]
    fn chain_of_thought_prompt_cues_reasoning() {
        let p = ProgramState::chain_of_thought().render("Wars", "Moon landing");
        assert!(p.contains("Reasoning: Let's think step by step in order to ${produce the category}."));
        assert!(p.ends_with("Event: Moon landing\nReasoning: Let's think step by step in order to"));
    }

    #[tokio::test]
    async fn category_line_wins_over_earlier_mentions() {
        let client = Arc::new(FakeClient::with_replies([
            "decide between Wars and Culture.\nCategory: Culture",
        ]));
        let c = ProgramClassifier::new("cot", ctx(client), ProgramState::chain_of_thought());
        assert_eq!(c.classify("Opening of the Globe Theatre").await.unwrap(), "Culture");
    }

    #[tokio::test]
    async fn unparseable_reply_is_error() {
        let client = Arc::new(FakeClient::with_replies(["I am not sure."]));
        let c = ProgramClassifier::new("predict", ctx(client), ProgramState::predict());
        let err = c.classify("x").await.unwrap_err();
        assert_eq!(BenchError::kind_of(&err), "unparseable_reply");
    }

    #[test]
    fn artifact_round_trip_and_version_check() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("program.json");
        let mut state = ProgramState::chain_of_thought();
        state.demos.push(LabeledExample::new("Treaty of Westphalia", "Politics"));
        state.save(&path).unwrap();
        assert_eq!(ProgramState::load(&path).unwrap(), state);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"strategy\": \"chain_of_thought\""));
        std::fs::write(&path, raw.replace("\"version\": 1", "\"version\": 7")).unwrap();
        let err = ProgramState::load(&path).unwrap_err();
        assert_eq!(BenchError::kind_of(&err), "unsupported_artifact");
    }

    #[test]
    fn save_replaces_artifact_without_leaving_temp_files() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("program.json");
        std::fs::write(&path, "stale, not json").unwrap();

        let state = ProgramState::predict();
        state.save(&path).unwrap();
        assert_eq!(ProgramState::load(&path).unwrap(), state);

        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("program.json")]);
    }
}
