use crate::classify::Classifier;
use crate::errors::BenchError;
use crate::model::{ClassificationResult, LabeledExample};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub name: String,
    pub correct: usize,
    /// Every example, including the ones whose classification failed.
    pub total: usize,
    pub failed: usize,
    pub accuracy: f64,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

impl EvalReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

/// Run `classifier` over `examples` in order, one call at a time.
///
/// A failing call is logged and skipped; it still counts toward `total`, so
/// `accuracy = correct / examples.len()`. The elapsed time covers the whole
/// loop.
pub async fn evaluate(
    classifier: &dyn Classifier,
    examples: &[LabeledExample],
) -> anyhow::Result<EvalReport> {
    if examples.is_empty() {
        return Err(BenchError::EmptyDataset.into());
    }

    let total = examples.len();
    let mut correct = 0usize;
    let mut failed = 0usize;

    let started = Instant::now();
    for (idx, example) in examples.iter().enumerate() {
        let predicted = match classifier.classify(&example.text).await {
            Ok(label) => label,
            Err(e) => {
                failed += 1;
                tracing::warn!(
                    classifier = classifier.name(),
                    example = idx,
                    kind = BenchError::kind_of(&e),
                    "error processing example: {:#}",
                    e
                );
                continue;
            }
        };
        let result = ClassificationResult {
            predicted,
            expected: example.category.clone(),
        };
        if result.is_correct() {
            correct += 1;
        } else {
            tracing::debug!(
                example = idx,
                predicted = %result.predicted,
                expected = %result.expected,
                "misclassified"
            );
        }
    }
    let elapsed = started.elapsed();

    Ok(EvalReport {
        name: classifier.name().to_string(),
        correct,
        total,
        failed,
        accuracy: correct as f64 / total as f64,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Constant(&'static str);

    #[async_trait]
    impl Classifier for Constant {
        fn name(&self) -> &str {
            "constant"
        }
        async fn classify(&self, _text: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    /// Echoes the text back as the label, failing on the configured call.
    struct FailOnCall {
        fail_at: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Classifier for FailOnCall {
        fn name(&self) -> &str {
            "flaky"
        }
        async fn classify(&self, text: &str) -> anyhow::Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n == self.fail_at {
                return Err(BenchError::transport("fake", Some(500), "boom").into());
            }
            Ok(text.to_string())
        }
    }

    fn treaty() -> Vec<LabeledExample> {
        serde_json::from_str(r#"[{"event":"Treaty signed ending a war","category":"Wars"}]"#)
            .unwrap()
    }

    #[tokio::test]
    async fn always_right_stub_scores_one() {
        let report = evaluate(&Constant("Wars"), &treaty()).await.unwrap();
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.correct, 1);
        assert_eq!(report.total, 1);
    }

    #[tokio::test]
    async fn always_wrong_stub_scores_zero() {
        let report = evaluate(&Constant("Politics"), &treaty()).await.unwrap();
        assert_eq!(report.accuracy, 0.0);
    }

    #[tokio::test]
    async fn failed_call_stays_in_denominator() {
        let examples: Vec<LabeledExample> = ["Wars", "Politics", "Science", "Culture"]
            .iter()
            .map(|c| LabeledExample::new(*c, *c))
            .collect();
        let clf = FailOnCall {
            fail_at: 1,
            calls: AtomicUsize::new(0),
        };
        let report = evaluate(&clf, &examples).await.unwrap();
        assert_eq!(clf.calls.load(Ordering::SeqCst), 4);
        assert_eq!(report.failed, 1);
        assert_eq!(report.correct, 3);
        assert_eq!(report.total, 4);
        assert_eq!(report.accuracy, 0.75);
    }

    #[tokio::test]
    async fn comparison_is_exact() {
        let report = evaluate(&Constant("wars"), &treaty()).await.unwrap();
        assert_eq!(report.correct, 0);
    }

    #[tokio::test]
    async fn empty_dataset_is_rejected() {
        let err = evaluate(&Constant("Wars"), &[]).await.unwrap_err();
        assert_eq!(BenchError::kind_of(&err), "empty_dataset");
    }

    #[test]
    fn report_serializes_elapsed_as_seconds() {
        let report = EvalReport {
            name: "x".into(),
            correct: 1,
            total: 2,
            failed: 0,
            accuracy: 0.5,
            elapsed: Duration::from_millis(1500),
        };
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["elapsed"], 1.5);
        let back: EvalReport = serde_json::from_value(v).unwrap();
        assert_eq!(back, report);
    }
}
