use super::super::args::{CommonArgs, Provider};
use labelbench_core::classify::PromptContext;
use labelbench_core::config::{load_config, BenchConfig};
use labelbench_core::errors::BenchError;
use labelbench_core::providers::llm::fake::FakeClient;
use labelbench_core::providers::llm::openai::{OpenAIClient, DEFAULT_BASE_URL};
use labelbench_core::providers::llm::tracing::TracingLlmClient;
use labelbench_core::providers::llm::LlmClient;
use std::sync::Arc;

/// Defaults, then the YAML file, then flag overrides.
pub(crate) fn resolve_config(common: &CommonArgs) -> anyhow::Result<BenchConfig> {
    let mut cfg = match &common.config {
        Some(path) => load_config(path)?,
        None => BenchConfig::default(),
    };
    if let Some(dataset) = &common.dataset {
        cfg.dataset = dataset.clone();
    }
    if let Some(model) = &common.generation_model {
        cfg.generation.model = model.clone();
    }
    if let Some(model) = &common.classification_model {
        cfg.classification.model = model.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn build_client(common: &CommonArgs) -> anyhow::Result<Arc<dyn LlmClient>> {
    let inner: Arc<dyn LlmClient> = match common.provider {
        Provider::Openai => {
            let api_key = common
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    BenchError::MissingCredential(
                        "OPENAI_API_KEY is not set (or pass --api-key)".into(),
                    )
                })?;
            let base_url = common
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
            Arc::new(OpenAIClient::with_base_url(api_key, base_url))
        }
        Provider::Fake => {
            let reply = common.fake_reply.clone().ok_or_else(|| {
                BenchError::Config("--fake-reply is required with --provider fake".into())
            })?;
            Arc::new(FakeClient::new().with_default_reply(reply))
        }
    };
    tracing::debug!(provider = common.provider.as_str(), "completion client ready");
    Ok(Arc::new(TracingLlmClient::new(inner)))
}

pub(crate) fn prompt_context(
    cfg: &BenchConfig,
    client: Arc<dyn LlmClient>,
) -> PromptContext {
    PromptContext::new(client, cfg.classification.clone(), cfg.categories.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn common(provider: Provider) -> CommonArgs {
        CommonArgs {
            config: None,
            dataset: None,
            provider,
            api_key: None,
            base_url: None,
            fake_reply: None,
            generation_model: None,
            classification_model: None,
        }
    }

    #[test]
    fn openai_without_key_is_missing_credential() {
        let err = build_client(&common(Provider::Openai)).err().unwrap();
        assert_eq!(BenchError::kind_of(&err), "missing_credential");
    }

    #[test]
    fn flags_override_defaults() {
        let mut args = common(Provider::Fake);
        args.dataset = Some(PathBuf::from("data/x.json"));
        args.classification_model = Some("tiny".into());
        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.dataset, PathBuf::from("data/x.json"));
        assert_eq!(cfg.classification.model, "tiny");
        assert_eq!(cfg.generation.model, "gpt-4o");
    }

    #[test]
    fn fake_provider_builds_with_reply() {
        let mut args = common(Provider::Fake);
        args.fake_reply = Some("Wars".into());
        let client = build_client(&args).unwrap();
        assert_eq!(client.provider_name(), "fake");
    }
}
