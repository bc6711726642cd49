//! Per-command arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::CommonArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Baseline prompt, first token of the reply
    Direct,
    /// Step-by-step prompt with label extraction fallbacks
    Reasoned,
    /// Signature-style program, no demos
    Predict,
    /// Signature-style program with a reasoning cue, no demos
    Cot,
    /// Program loaded from --program
    Program,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Predict,
    Cot,
}

#[derive(Parser, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// examples requested per category
    #[arg(long)]
    pub per_category: Option<usize>,
}

#[derive(Parser, Clone, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t = Variant::Direct)]
    pub variant: Variant,

    /// program artifact used by --variant program
    #[arg(long, default_value = "optimized_classifier.json")]
    pub program: PathBuf,
}

#[derive(Parser, Clone, Debug)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// maximum number of few-shot demos
    #[arg(long, default_value_t = 16)]
    pub k: usize,

    #[arg(long, value_enum, default_value_t = StrategyArg::Predict)]
    pub strategy: StrategyArg,

    #[arg(long, default_value = "optimized_classifier.json")]
    pub out: PathBuf,
}

#[derive(Parser, Clone, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// reuse a saved program instead of compiling one
    #[arg(long)]
    pub program: Option<PathBuf>,

    /// demos for the program compiled in-run (ignored with --program)
    #[arg(long, default_value_t = 16)]
    pub k: usize,

    /// save the program compiled in-run
    #[arg(long, conflicts_with = "program")]
    pub save_program: Option<PathBuf>,

    /// write machine-readable results here
    #[arg(long)]
    pub output: Option<PathBuf>,
}
