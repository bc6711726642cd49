use super::extract::LabelExtractor;
use super::prompt::{render, DIRECT_TEMPLATE};
use super::{Classifier, PromptContext};
use crate::errors::BenchError;
use async_trait::async_trait;

/// Baseline prompt: answer with the label only. The first token of the reply
/// is returned as-is, even if it is not a known label.
pub struct DirectClassifier {
    ctx: PromptContext,
    extractor: LabelExtractor,
}

impl DirectClassifier {
    pub fn new(ctx: PromptContext) -> Self {
        Self {
            ctx,
            extractor: LabelExtractor::direct(),
        }
    }
}

#[async_trait]
impl Classifier for DirectClassifier {
    fn name(&self) -> &str {
        "Direct prompt (baseline)"
    }

    async fn classify(&self, text: &str) -> anyhow::Result<String> {
        let prompt = render(DIRECT_TEMPLATE, &self.ctx.categories.joined(), text);
        let reply = self.ctx.ask(prompt).await?;
        let (label, _) = self
            .extractor
            .extract(&reply, &self.ctx.categories)
            .ok_or(BenchError::EmptyReply)?;
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassificationSettings;
    use crate::model::CategorySet;
    use crate::providers::llm::fake::{FakeClient, FakeReply};
    use std::sync::Arc;

    fn classifier(client: Arc<FakeClient>) -> DirectClassifier {
        DirectClassifier::new(PromptContext::new(
            client,
            ClassificationSettings::default(),
            CategorySet::default(),
        ))
    }

    #[tokio::test]
    async fn returns_first_token_and_uses_deterministic_settings() {
        let client = Arc::new(FakeClient::with_replies(["Science\nbecause of the telescope"]));
        let label = classifier(client.clone())
            .classify("Galileo observes Jupiter's moons")
            .await
            .unwrap();
        assert_eq!(label, "Science");

        let req = &client.requests()[0];
        assert_eq!(req.model, "gpt-4o-mini");
        assert_eq!(req.temperature, 0.0);
        assert_eq!(req.max_tokens, 50);
        assert_eq!(req.messages.len(), 1);
        assert!(req.messages[0]
            .content
            .contains("Allowed labels: Wars, Politics, Science, Culture"));
        assert!(req.messages[0]
            .content
            .contains("Galileo observes Jupiter's moons"));
    }

    #[tokio::test]
    async fn out_of_vocabulary_token_is_not_validated() {
        let client = Arc::new(FakeClient::with_replies(["**Science**"]));
        let label = classifier(client).classify("x").await.unwrap();
        assert_eq!(label, "**Science**");
    }

    #[tokio::test]
    async fn empty_reply_and_transport_failure_are_errors() {
        let client = Arc::new(FakeClient::with_script(vec![
            FakeReply::Text("   ".into()),
            FakeReply::Fail("timeout".into()),
        ]));
        let c = classifier(client);
        let err = c.classify("x").await.unwrap_err();
        assert_eq!(BenchError::kind_of(&err), "empty_reply");
        let err = c.classify("x").await.unwrap_err();
        assert_eq!(BenchError::kind_of(&err), "transport");
    }
}
