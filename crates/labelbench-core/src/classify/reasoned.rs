use super::extract::LabelExtractor;
use super::prompt::{render, REASONED_TEMPLATE};
use super::{Classifier, PromptContext};
use crate::errors::BenchError;
use async_trait::async_trait;

/// Step-by-step prompt. Never fails on reply content: when no label can be
/// found the first category is returned.
pub struct ReasonedClassifier {
    ctx: PromptContext,
    extractor: LabelExtractor,
}

impl ReasonedClassifier {
    pub fn new(ctx: PromptContext) -> Self {
        Self {
            ctx,
            extractor: LabelExtractor::reasoned(),
        }
    }
}

#[async_trait]
impl Classifier for ReasonedClassifier {
    fn name(&self) -> &str {
        "Chain-of-thought prompt"
    }

    async fn classify(&self, text: &str) -> anyhow::Result<String> {
        let prompt = render(REASONED_TEMPLATE, &self.ctx.categories.joined(), text);
        let reply = self.ctx.ask(prompt).await?;
        let (label, via) = self
            .extractor
            .extract(&reply, &self.ctx.categories)
            .ok_or_else(|| BenchError::UnparseableReply {
                reply: reply.clone(),
            })?;
        if via == "first_label_default" {
            tracing::debug!(reply = %reply, "no label in reasoned reply, using default");
        }
        Ok(label)
    }
}
