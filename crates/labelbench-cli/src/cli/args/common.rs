//! Flags shared by every command.

use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// OpenAI-compatible chat completions (needs OPENAI_API_KEY)
    Openai,
    /// Offline: every call returns --fake-reply
    Fake,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Openai => "openai",
            Provider::Fake => "fake",
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// YAML config (categories, models, sampling); defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dataset file [default: labeled_event_examples.json]
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Provider::Openai)]
    pub provider: Provider,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Reply returned by the fake provider for every request
    #[arg(long, required_if_eq("provider", "fake"))]
    pub fake_reply: Option<String>,

    /// Override the generation model
    #[arg(long)]
    pub generation_model: Option<String>,

    /// Override the classification model
    #[arg(long)]
    pub classification_model: Option<String>,
}
