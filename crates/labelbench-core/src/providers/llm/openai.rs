use super::LlmClient;
use crate::errors::BenchError;
use crate::model::{CompletionRequest, LlmResponse};
use async_trait::async_trait;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIClient {
    pub api_key: String,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point at any OpenAI-compatible endpoint (proxies, local servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

pub(crate) fn request_body(request: &CompletionRequest) -> serde_json::Value {
    json!({
        "model": request.model,
        "messages": request.messages,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
    })
}

/// Pull `choices[0].message.content` out of a chat-completions response.
pub(crate) fn extract_content(body: &serde_json::Value) -> anyhow::Result<String> {
    let text = body
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            BenchError::transport("openai", None, "OpenAI API response missing content")
        })?;
    Ok(text.trim().to_string())
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<LlmResponse> {
        let url = self.endpoint();
        let body = request_body(request);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BenchError::transport("openai", None, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            return Err(BenchError::transport(
                "openai",
                Some(status.as_u16()),
                format!("OpenAI chat API error: {}", error_text),
            )
            .into());
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| BenchError::transport("openai", None, e.to_string()))?;
        let text = extract_content(&json)?;

        Ok(LlmResponse {
            text,
            provider: "openai".to_string(),
            model: json
                .get("model")
                .and_then(|m| m.as_str())
                .unwrap_or(&request.model)
                .to_string(),
            meta: json.get("usage").cloned().unwrap_or_else(|| json!({})),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
