use clap::{Parser, Subcommand};

pub mod common;
pub mod run;
pub use common::*;
pub use run::*;

#[derive(Parser)]
#[command(
    name = "labelbench",
    version,
    about = "Compare hand-written prompts against compiled prompt programs on an LLM text-classification task"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the labeled dataset (skipped if the file already exists)
    Generate(GenerateArgs),
    /// Evaluate one classifier variant against the dataset
    Evaluate(EvaluateArgs),
    /// Compile a prompt program from the dataset and save it as an artifact
    Optimize(OptimizeArgs),
    /// Evaluate every variant and print a side-by-side summary
    Compare(CompareArgs),
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fake_provider_requires_reply() {
        let res = Cli::try_parse_from(["labelbench", "evaluate", "--provider", "fake"]);
        assert!(res.is_err());
        let res = Cli::try_parse_from([
            "labelbench",
            "evaluate",
            "--provider",
            "fake",
            "--fake-reply",
            "Wars",
            "--variant",
            "reasoned",
        ]);
        let cli = res.unwrap_or_else(|e| panic!("{e}"));
        match cli.cmd {
            Command::Evaluate(args) => {
                assert_eq!(args.variant, Variant::Reasoned);
                assert_eq!(args.common.provider, Provider::Fake);
            }
            _ => panic!("expected evaluate"),
        }
    }
}
