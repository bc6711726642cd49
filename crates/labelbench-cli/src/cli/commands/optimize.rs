use super::super::args::{OptimizeArgs, StrategyArg};
use super::client_builder::resolve_config;
use super::load_dataset_or_exit;
use crate::exit_codes::EXIT_SUCCESS;
use labelbench_core::classify::optimizer::{LabeledFewShot, Optimizer};
use labelbench_core::classify::ProgramState;
use std::time::Instant;

pub(crate) async fn run(args: OptimizeArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(&args.common)?;
    let examples = match load_dataset_or_exit(&cfg.dataset)? {
        Ok(examples) => examples,
        Err(code) => return Ok(code),
    };

    let student = match args.strategy {
        StrategyArg::Predict => ProgramState::predict(),
        StrategyArg::Cot => ProgramState::chain_of_thought(),
    };
    let optimizer = LabeledFewShot::new(args.k, cfg.categories.clone());

    println!("Optimizing prompts...");
    let started = Instant::now();
    let compiled = optimizer.compile(&student, &examples)?;
    println!(
        "Optimization completed in {:.1}s",
        started.elapsed().as_secs_f64()
    );

    compiled.save(&args.out)?;
    println!("Optimized program saved to '{}'", args.out.display());
    Ok(EXIT_SUCCESS)
}
