//! Classifiers: one text in, one label out.
//!
//! `Direct` and `Reasoned` use the hand-written templates in `prompt`;
//! [`program::ProgramClassifier`] renders a signature-style prompt from a
//! loaded or compiled [`program::ProgramState`].

use crate::config::ClassificationSettings;
use crate::model::{CategorySet, ChatMessage, CompletionRequest};
use crate::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;

pub mod direct;
pub mod extract;
pub mod optimizer;
pub mod program;
pub(crate) mod prompt;
pub mod reasoned;

pub use direct::DirectClassifier;
pub use program::{ProgramClassifier, ProgramState, ProgramStrategy};
pub use reasoned::ReasonedClassifier;

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Display name used in reports.
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> anyhow::Result<String>;
}

/// Shared plumbing for prompt-based classifiers: model settings, the client
/// and the category set.
#[derive(Clone)]
pub struct PromptContext {
    pub client: Arc<dyn LlmClient>,
    pub settings: ClassificationSettings,
    pub categories: CategorySet,
}

impl PromptContext {
    pub fn new(
        client: Arc<dyn LlmClient>,
        settings: ClassificationSettings,
        categories: CategorySet,
    ) -> Self {
        Self {
            client,
            settings,
            categories,
        }
    }

    /// Single user-message round trip; returns the trimmed reply.
    pub(crate) async fn ask(&self, prompt: String) -> anyhow::Result<String> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };
        let resp = self.client.complete(&request).await?;
        Ok(resp.text.trim().to_string())
    }
}
