use crate::errors::BenchError;
use serde::{Deserialize, Serialize};

/// Number of labels every [`CategorySet`] holds.
pub const CATEGORY_COUNT: usize = 4;

/// Labels used when no configuration overrides them.
pub const DEFAULT_CATEGORIES: [&str; CATEGORY_COUNT] = ["Wars", "Politics", "Science", "Culture"];

/// One labeled snippet. Stored on disk as `{"event": ..., "category": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    #[serde(rename = "event", alias = "text")]
    pub text: String,
    pub category: String,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Ordered, read-only set of classification targets.
///
/// Order matters: extraction strategies scan labels in this order and the
/// reasoned classifier falls back to the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    labels: Vec<String>,
}

impl CategorySet {
    pub fn new<I, S>(labels: I) -> Result<Self, BenchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != CATEGORY_COUNT {
            return Err(BenchError::InvalidCategorySet(format!(
                "expected exactly {} labels, got {}",
                CATEGORY_COUNT,
                labels.len()
            )));
        }
        for (idx, label) in labels.iter().enumerate() {
            if label.trim().is_empty() || label.split_whitespace().count() != 1 {
                return Err(BenchError::InvalidCategorySet(format!(
                    "label {:?} must be a single non-empty word",
                    label
                )));
            }
            if labels[..idx].contains(label) {
                return Err(BenchError::InvalidCategorySet(format!(
                    "duplicate label {:?}",
                    label
                )));
            }
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// The first label; the reasoned classifier's silent default.
    pub fn first(&self) -> &str {
        &self.labels[0]
    }

    /// Comma separated list, as rendered into prompts.
    pub fn joined(&self) -> String {
        self.labels.join(", ")
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for CategorySet {
    type Error = BenchError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.labels
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub predicted: String,
    pub expected: String,
}

impl ClassificationResult {
    /// Exact, case-sensitive comparison.
    pub fn is_correct(&self) -> bool {
        self.predicted == self.expected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Everything the completion service needs for one round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub meta: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_category_order_is_stable() {
        let set = CategorySet::default();
        assert_eq!(set.labels(), &["Wars", "Politics", "Science", "Culture"]);
        assert_eq!(set.first(), "Wars");
        assert_eq!(set.joined(), "Wars, Politics, Science, Culture");
    }

    #[test]
    fn category_set_rejects_duplicates_and_bad_labels() {
        assert!(CategorySet::new(["Wars", "Wars", "Science", "Culture"]).is_err());
        assert!(CategorySet::new(["Wars", "Two words", "Science", "Culture"]).is_err());
        assert!(CategorySet::new(["Wars", " ", "Science", "Culture"]).is_err());
        assert!(CategorySet::new(["Sports", "Music", "Film", "Art"]).is_ok());
    }

    #[test]
    fn category_set_requires_exactly_four_labels() {
        for labels in [
            vec![],
            vec!["Peace"],
            vec!["Peace", "Arts"],
            vec!["Wars", "Politics", "Science", "Culture", "Sports"],
        ] {
            let err = CategorySet::new(labels.clone()).unwrap_err();
            assert_eq!(err.kind(), "invalid_category_set", "labels: {:?}", labels);
        }
    }

    #[test]
    fn labeled_example_reads_event_or_text_field() {
        let a: LabeledExample =
            serde_json::from_str(r#"{"event":"Treaty signed","category":"Wars"}"#).unwrap();
        let b: LabeledExample =
            serde_json::from_str(r#"{"text":"Treaty signed","category":"Wars"}"#).unwrap();
        assert_eq!(a, b);
        let out = serde_json::to_value(&a).unwrap();
        assert_eq!(out["event"], "Treaty signed");
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let r = ClassificationResult {
            predicted: "wars".into(),
            expected: "Wars".into(),
        };
        assert!(!r.is_correct());
    }
}
