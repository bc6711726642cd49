//! Pluggable program compilers.
//!
//! An optimizer turns a student [`ProgramState`] plus a labeled trainset into
//! a new state. Search-based optimizers live outside this crate and plug in
//! through [`Optimizer`]; [`LabeledFewShot`] is the built-in compiler.

use super::program::ProgramState;
use crate::model::{CategorySet, LabeledExample};

pub trait Optimizer {
    fn name(&self) -> &str;

    fn compile(
        &self,
        student: &ProgramState,
        trainset: &[LabeledExample],
    ) -> anyhow::Result<ProgramState>;
}

/// Attaches up to `k` labeled demos, taken round-robin across categories so
/// every label is represented before any label repeats.
pub struct LabeledFewShot {
    pub k: usize,
    pub categories: CategorySet,
}

impl LabeledFewShot {
    pub fn new(k: usize, categories: CategorySet) -> Self {
        Self { k, categories }
    }

    fn select(&self, trainset: &[LabeledExample]) -> Vec<LabeledExample> {
        let buckets: Vec<Vec<&LabeledExample>> = self
            .categories
            .labels()
            .iter()
            .map(|label| trainset.iter().filter(|ex| &ex.category == label).collect())
            .collect();

        let mut picked = Vec::with_capacity(self.k);
        let mut round = 0;
        while picked.len() < self.k {
            let mut any = false;
            for bucket in &buckets {
                if picked.len() == self.k {
                    break;
                }
                if let Some(ex) = bucket.get(round) {
                    picked.push((*ex).clone());
                    any = true;
                }
            }
            if !any {
                break;
            }
            round += 1;
        }
        picked
    }
}

impl Optimizer for LabeledFewShot {
    fn name(&self) -> &str {
        "labeled_few_shot"
    }

    fn compile(
        &self,
        student: &ProgramState,
        trainset: &[LabeledExample],
    ) -> anyhow::Result<ProgramState> {
        let mut compiled = student.clone();
        compiled.demos = self.select(trainset);
        let skipped = trainset
            .iter()
            .filter(|ex| !self.categories.contains(&ex.category))
            .count();
        if skipped > 0 {
            tracing::warn!(skipped, "trainset examples with unknown categories were ignored");
        }
        tracing::info!(
            optimizer = self.name(),
            demos = compiled.demos.len(),
            trainset = trainset.len(),
            "compiled program"
        );
        Ok(compiled)
    }
}
