use super::parse::ListParser;
use crate::config::GenerationSettings;
use crate::errors::BenchError;
use crate::model::{CategorySet, ChatMessage, CompletionRequest};
use crate::providers::llm::LlmClient;
use std::sync::Arc;

const SYSTEM_PROMPT: &str =
    "You generate high-quality synthetic data. Always respond with valid JSON arrays only.";

pub(crate) fn build_prompt(category: &str, count: usize) -> String {
    format!(
        "You are a dataset-generation assistant.\n\
         Produce exactly {count} short, realistic historical\n\
         event descriptions that clearly belong to the category: {category}.\n\n\
         Return ONLY a valid JSON array of strings, nothing else. Example format:\n\
         [\"Event one description\", \"Event two description\", \"Event three description\"]\n\n\
         Do not include any other text, explanations, or formatting - just the JSON array."
    )
}

/// Asks the completion service for synthetic examples of one category.
pub struct Generator {
    client: Arc<dyn LlmClient>,
    settings: GenerationSettings,
    categories: CategorySet,
    parser: ListParser,
}

impl Generator {
    pub fn new(
        client: Arc<dyn LlmClient>,
        settings: GenerationSettings,
        categories: CategorySet,
    ) -> Self {
        Self {
            client,
            settings,
            categories,
            parser: ListParser::default(),
        }
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn per_category(&self) -> usize {
        self.settings.per_category
    }

    /// Request `count` descriptions of `category`.
    ///
    /// Malformed replies degrade to the line heuristic and may yield fewer
    /// than `count` items. Transport failures are returned as errors.
    pub async fn generate(&self, category: &str, count: usize) -> anyhow::Result<Vec<String>> {
        if count == 0 {
            return Err(BenchError::InvalidCount.into());
        }
        if !self.categories.contains(category) {
            return Err(BenchError::UnknownCategory {
                category: category.to_string(),
                allowed: self.categories.joined(),
            }
            .into());
        }

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(category, count)),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let resp = self.client.complete(&request).await?;
        let raw = resp.text.trim();
        let (items, via) = self.parser.parse(raw);
        if via != "json_array" {
            tracing::warn!(
                category,
                strategy = via,
                extracted = items.len(),
                "generation reply was not a JSON string array; used fallback parsing"
            );
            tracing::debug!(category, raw, "raw generation reply");
        }
        if items.len() < count {
            tracing::info!(
                category,
                requested = count,
                received = items.len(),
                "model returned fewer examples than requested"
            );
        }
        Ok(items)
    }
}
