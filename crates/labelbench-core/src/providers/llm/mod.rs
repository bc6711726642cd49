use crate::model::{CompletionRequest, LlmResponse};
use async_trait::async_trait;

pub mod fake;
pub mod openai;
pub mod tracing;

/// Chat-completion boundary. Implementations own transport, auth and
/// response decoding; callers only see text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}
