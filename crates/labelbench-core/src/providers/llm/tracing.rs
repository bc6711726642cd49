use super::LlmClient;
use crate::model::{CompletionRequest, LlmResponse};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info_span, Instrument};

/// Decorator that wraps every completion call in an `llm.request` span and
/// records latency, reply size and failures.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<LlmResponse> {
        let provider = self.inner.provider_name();
        let span = info_span!(
            "llm.request",
            "llm.provider" = provider,
            "llm.request.model" = request.model.as_str(),
            "llm.request.temperature" = request.temperature as f64,
            "llm.request.max_tokens" = request.max_tokens,
            "llm.response.chars" = tracing::field::Empty,
            "llm.latency_ms" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        let started = Instant::now();
        let result = self
            .inner
            .complete(request)
            .instrument(span.clone())
            .await;
        let latency_ms = started.elapsed().as_millis() as u64;
        span.record("llm.latency_ms", latency_ms);

        match &result {
            Ok(resp) => {
                span.record("llm.response.chars", resp.text.chars().count() as u64);
                tracing::debug!(parent: &span, provider, latency_ms, "completion ok");
            }
            Err(e) => {
                span.record("error", true);
                span.record("error.message", e.to_string().as_str());
                tracing::debug!(parent: &span, provider, latency_ms, error = %e, "completion failed");
            }
        }
        result
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChatMessage;
    use crate::providers::llm::fake::{FakeClient, FakeReply};

    #[tokio::test]
    async fn passes_replies_and_errors_through() {
        let inner = Arc::new(FakeClient::with_script(vec![
            FakeReply::Text("Science".into()),
            FakeReply::Fail("quota".into()),
        ]));
        let client = TracingLlmClient::new(inner.clone());
        let req = CompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user("x")],
            temperature: 0.0,
            max_tokens: 50,
        };
        assert_eq!(client.complete(&req).await.unwrap().text, "Science");
        let err = client.complete(&req).await.unwrap_err();
        assert!(err.to_string().contains("quota"));
        assert_eq!(client.provider_name(), "fake");
        assert_eq!(inner.calls(), 2);
    }
}
