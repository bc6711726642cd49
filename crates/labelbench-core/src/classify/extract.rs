//! Label extraction from free-text replies.
//!
//! Each classifier variant owns an ordered chain of strategies; the first
//! strategy that returns a label wins. Keeping the precedence as data makes
//! it testable without a model in the loop.

use crate::model::CategorySet;

const TRAILING_PUNCT: &[char] = &['.', ',', '!', '?'];

pub trait LabelStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, reply: &str, labels: &CategorySet) -> Option<String>;
}

/// First whitespace-delimited token, verbatim and unvalidated.
pub struct FirstToken;

impl LabelStrategy for FirstToken {
    fn name(&self) -> &'static str {
        "first_token"
    }

    fn extract(&self, reply: &str, _labels: &CategorySet) -> Option<String> {
        reply.split_whitespace().next().map(str::to_string)
    }
}

/// First label (in category order) that occurs anywhere in the reply.
pub struct LabelSubstring;

impl LabelStrategy for LabelSubstring {
    fn name(&self) -> &'static str {
        "label_substring"
    }

    fn extract(&self, reply: &str, labels: &CategorySet) -> Option<String> {
        labels
            .labels()
            .iter()
            .find(|label| reply.contains(label.as_str()))
            .cloned()
    }
}

/// Last token with `.,!?` stripped, accepted only if it is a label.
pub struct LastTokenLabel;

impl LabelStrategy for LastTokenLabel {
    fn name(&self) -> &'static str {
        "last_token"
    }

    fn extract(&self, reply: &str, labels: &CategorySet) -> Option<String> {
        let last = reply.split_whitespace().last()?.trim_matches(TRAILING_PUNCT);
        labels.contains(last).then(|| last.to_string())
    }
}

/// Always answers with the first label.
pub struct FirstLabelDefault;

impl LabelStrategy for FirstLabelDefault {
    fn name(&self) -> &'static str {
        "first_label_default"
    }

    fn extract(&self, _reply: &str, labels: &CategorySet) -> Option<String> {
        Some(labels.first().to_string())
    }
}

/// Value of a `<Field>: value` line (case-insensitive field name), if that
/// value is a label once markdown emphasis and punctuation are removed.
pub struct FieldLine {
    pub field: &'static str,
}

impl LabelStrategy for FieldLine {
    fn name(&self) -> &'static str {
        "field_line"
    }

    fn extract(&self, reply: &str, labels: &CategorySet) -> Option<String> {
        reply.lines().find_map(|line| {
            let line = line.trim().trim_matches('*').trim();
            let (key, value) = line.split_once(':')?;
            if !key.trim().trim_matches('*').eq_ignore_ascii_case(self.field) {
                return None;
            }
            let value = value
                .trim()
                .trim_start_matches('*')
                .split_whitespace()
                .next()?
                .trim_matches(|c: char| c == '*' || c == '"' || c == '\'' || c == '`')
                .trim_matches(TRAILING_PUNCT);
            labels.contains(value).then(|| value.to_string())
        })
    }
}

pub struct LabelExtractor {
    strategies: Vec<Box<dyn LabelStrategy>>,
}

impl LabelExtractor {
    pub fn new(strategies: Vec<Box<dyn LabelStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn direct() -> Self {
        Self::new(vec![Box::new(FirstToken)])
    }

    /// Substring, then last token, then the first label as a silent default.
    pub fn reasoned() -> Self {
        Self::new(vec![
            Box::new(LabelSubstring),
            Box::new(LastTokenLabel),
            Box::new(FirstLabelDefault),
        ])
    }

    pub fn program(output_field: &'static str) -> Self {
        Self::new(vec![
            Box::new(FieldLine {
                field: output_field,
            }),
            Box::new(LabelSubstring),
            Box::new(LastTokenLabel),
        ])
    }

    /// Returns the label and the name of the strategy that produced it.
    pub fn extract(&self, reply: &str, labels: &CategorySet) -> Option<(String, &'static str)> {
        self.strategies
            .iter()
            .find_map(|s| s.extract(reply, labels).map(|label| (label, s.name())))
    }
}
