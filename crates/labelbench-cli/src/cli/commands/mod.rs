use super::args::*;

pub(crate) mod client_builder;
pub(crate) mod compare;
pub(crate) mod evaluate;
pub(crate) mod generate;
pub(crate) mod optimize;

use crate::exit_codes::{EXIT_MISSING_INPUT, EXIT_SUCCESS};
use labelbench_core::errors::BenchError;
use labelbench_core::model::LabeledExample;
use std::path::Path;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Generate(args) => generate::run(args).await,
        Command::Evaluate(args) => evaluate::run(args).await,
        Command::Optimize(args) => optimize::run(args).await,
        Command::Compare(args) => compare::run(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}

/// Load the dataset for evaluation-style commands. A missing file is not a
/// crash: the user gets a hint and the command ends with `EXIT_MISSING_INPUT`.
pub(crate) fn load_dataset_or_exit(
    path: &Path,
) -> anyhow::Result<Result<Vec<LabeledExample>, i32>> {
    match labelbench_core::dataset::load_existing(path) {
        Ok(examples) => Ok(Ok(examples)),
        Err(e) if BenchError::kind_of(&e) == "missing_input" => {
            eprintln!(
                "Test data not found: {}. Run `labelbench generate` first to create it.",
                path.display()
            );
            Ok(Err(EXIT_MISSING_INPUT))
        }
        Err(e) => Err(e),
    }
}
