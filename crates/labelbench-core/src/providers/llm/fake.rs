use super::LlmClient;
use crate::errors::BenchError;
use crate::model::{CompletionRequest, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// A scripted reply: either text or a simulated transport failure.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    Fail(String),
}

/// Offline client. Replies are served from a script in order; once the
/// script is exhausted the default reply (if any) is returned forever.
/// Every request is recorded for inspection.
pub struct FakeClient {
    script: Mutex<VecDeque<FakeReply>>,
    default_reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

/// A panic while a lock is held leaves only plain data behind, so a poisoned
/// guard is still usable.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl FakeClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        lock(&client.script).extend(replies.into_iter().map(|r| FakeReply::Text(r.into())));
        client
    }

    pub fn with_script(script: Vec<FakeReply>) -> Self {
        let client = Self::new();
        *lock(&client.script) = script.into();
        client
    }

    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = Some(reply.into());
        self
    }

    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }
}

impl Default for FakeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<LlmResponse> {
        lock(&self.requests).push(request.clone());
        let next = lock(&self.script).pop_front();
        let text = match next {
            Some(FakeReply::Text(text)) => text,
            Some(FakeReply::Fail(detail)) => {
                return Err(BenchError::transport("fake", None, detail).into())
            }
            None => match &self.default_reply {
                Some(text) => text.clone(),
                None => {
                    return Err(
                        BenchError::transport("fake", None, "no more scripted replies").into(),
                    )
                }
            },
        };
        Ok(LlmResponse {
            text: text.trim().to_string(),
            provider: "fake".to_string(),
            model: request.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChatMessage;

    fn req() -> CompletionRequest {
        CompletionRequest {
            model: "m".into(),
            messages: vec![ChatMessage::user("x")],
            temperature: 0.0,
            max_tokens: 1,
        }
    }

    #[tokio::test]
    async fn serves_script_then_default() {
        let client = FakeClient::with_script(vec![
            FakeReply::Text(" a ".into()),
            FakeReply::Fail("down".into()),
        ])
        .with_default_reply("z");
        assert_eq!(client.complete(&req()).await.unwrap().text, "a");
        assert!(client.complete(&req()).await.is_err());
        assert_eq!(client.complete(&req()).await.unwrap().text, "z");
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn exhausted_script_without_default_fails() {
        let client = FakeClient::new();
        let err = client.complete(&req()).await.unwrap_err();
        assert_eq!(BenchError::kind_of(&err), "transport");
    }

    #[tokio::test]
    async fn poisoned_lock_keeps_serving() {
        let client = std::sync::Arc::new(FakeClient::with_replies(["first"]));
        let poisoner = client.clone();
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.requests.lock().unwrap();
            panic!("poison the request log");
        })
        .join();
        assert!(joined.is_err());
        assert!(client.requests.is_poisoned());

        assert_eq!(client.complete(&req()).await.unwrap().text, "first");
        assert_eq!(client.calls(), 1);
    }
}
