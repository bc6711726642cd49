//! Error types shared by the dataset, classifier and evaluator layers.
//!
//! Provider and classifier seams return `anyhow::Result`; the variants here
//! are wrapped into `anyhow::Error` and recovered with `downcast_ref` where
//! the caller needs to branch on the kind.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// The completion service call itself failed (network, auth, quota, 5xx).
    #[error("transport error ({provider}{}): {detail}", .status.map(|s| format!(", status {}", s)).unwrap_or_default())]
    Transport {
        provider: String,
        status: Option<u16>,
        detail: String,
    },

    /// Dataset file required for evaluation does not exist.
    #[error("dataset not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("dataset is empty; nothing to evaluate")]
    EmptyDataset,

    /// Model replied with nothing usable for a first-token classifier.
    #[error("empty reply from model")]
    EmptyReply,

    #[error("no label could be extracted from reply: {reply:?}")]
    UnparseableReply { reply: String },

    #[error("invalid category set: {0}")]
    InvalidCategorySet(String),

    #[error("category {category:?} is not one of [{allowed}]")]
    UnknownCategory { category: String, allowed: String },

    #[error("example count must be positive")]
    InvalidCount,

    #[error("unsupported program artifact version {found} (expected {expected})")]
    UnsupportedArtifact { found: u32, expected: u32 },

    #[error("config error: {0}")]
    Config(String),

    #[error("missing credential: {0}")]
    MissingCredential(String),
}

impl BenchError {
    pub fn transport(
        provider: impl Into<String>,
        status: Option<u16>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Transport {
            provider: provider.into(),
            status,
            detail: detail.into(),
        }
    }

    /// Stable machine-readable kind, used in logs and summary output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::MissingInput { .. } => "missing_input",
            Self::EmptyDataset => "empty_dataset",
            Self::EmptyReply => "empty_reply",
            Self::UnparseableReply { .. } => "unparseable_reply",
            Self::InvalidCategorySet(_) => "invalid_category_set",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::InvalidCount => "invalid_count",
            Self::UnsupportedArtifact { .. } => "unsupported_artifact",
            Self::Config(_) => "config",
            Self::MissingCredential(_) => "missing_credential",
        }
    }

    /// Best-effort kind for an arbitrary error chain.
    pub fn kind_of(err: &anyhow::Error) -> &'static str {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<BenchError>())
            .map(BenchError::kind)
            .unwrap_or("other")
    }
}
