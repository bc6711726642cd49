//! Turning a free-form generation reply into a list of example strings.
//!
//! Strategies are tried in order and the first one returning `Some` wins.
//! The chain always ends with the line heuristic, which cannot fail, so
//! malformed model output never becomes an error.

/// One way of reading a generation reply.
pub trait ListStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, raw: &str) -> Option<Vec<String>>;
}

/// Strict JSON: the reply must be an array whose elements are all strings.
pub struct JsonArray;

impl ListStrategy for JsonArray {
    fn name(&self) -> &'static str {
        "json_array"
    }

    fn parse(&self, raw: &str) -> Option<Vec<String>> {
        let value: serde_json::Value = match serde_json::from_str(raw.trim()) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "reply is not valid JSON");
                return None;
            }
        };
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                tracing::debug!("reply JSON is not a list");
                return None;
            }
        };
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .or_else(|| {
                tracing::debug!("reply list contains non-string items");
                None
            })
    }
}

const BULLET_CHARS: &[char] = &['-', '*', '•', ' '];
const SCAFFOLD_PREFIXES: &[&str] = &["[", "]", "{", "}", "\"number_", "\"category_"];
const SCAFFOLD_SUFFIXES: &[char] = &[',', '"'];
const MIN_LINE_CHARS: usize = 10;

/// Line heuristic for replies that are bullet lists or broken JSON.
///
/// Lines of `MIN_LINE_CHARS` characters or fewer, and lines that look like
/// JSON scaffolding (brackets, quoted keys, trailing comma or quote) are
/// dropped.
pub struct BulletLines;

impl BulletLines {
    fn clean_line(line: &str) -> Option<String> {
        let line = line.trim().trim_start_matches(BULLET_CHARS).trim();
        if line.chars().count() <= MIN_LINE_CHARS {
            return None;
        }
        if SCAFFOLD_PREFIXES.iter().any(|p| line.starts_with(p)) {
            return None;
        }
        if line.ends_with(SCAFFOLD_SUFFIXES) {
            return None;
        }
        let line = match line
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => inner,
            None => line,
        };
        Some(line.to_string())
    }
}

impl ListStrategy for BulletLines {
    fn name(&self) -> &'static str {
        "bullet_lines"
    }

    fn parse(&self, raw: &str) -> Option<Vec<String>> {
        Some(raw.lines().filter_map(Self::clean_line).collect())
    }
}

/// Ordered strategy chain.
pub struct ListParser {
    strategies: Vec<Box<dyn ListStrategy>>,
}

impl Default for ListParser {
    fn default() -> Self {
        Self {
            strategies: vec![Box::new(JsonArray), Box::new(BulletLines)],
        }
    }
}

impl ListParser {
    pub fn new(strategies: Vec<Box<dyn ListStrategy>>) -> Self {
        Self { strategies }
    }

    /// Returns the parsed items and the name of the strategy that produced
    /// them. An empty list is returned if every strategy declines.
    pub fn parse(&self, raw: &str) -> (Vec<String>, &'static str) {
        for strategy in &self.strategies {
            if let Some(items) = strategy.parse(raw) {
                return (items, strategy.name());
            }
        }
        (Vec::new(), "none")
    }
}
