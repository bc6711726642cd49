use super::super::args::{CompareArgs, Variant};
use super::client_builder::{build_client, prompt_context, resolve_config};
use super::evaluate::builtin_classifier;
use super::load_dataset_or_exit;
use crate::exit_codes::{EXIT_MISSING_INPUT, EXIT_SUCCESS};
use labelbench_core::classify::optimizer::{LabeledFewShot, Optimizer};
use labelbench_core::classify::{Classifier, ProgramClassifier, ProgramState};
use labelbench_core::engine::evaluate;
use labelbench_core::report::console::{format_summary, print_report};
use labelbench_core::report::summary::{write_summary, Summary};
use std::time::Instant;

pub(crate) async fn run(args: CompareArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(&args.common)?;
    let examples = match load_dataset_or_exit(&cfg.dataset)? {
        Ok(examples) => examples,
        Err(code) => return Ok(code),
    };
    println!("Training set size: {}", examples.len());

    let (optimized, optimization_secs) = match &args.program {
        Some(path) => {
            if !path.exists() {
                eprintln!("Program artifact not found: {}", path.display());
                return Ok(EXIT_MISSING_INPUT);
            }
            (ProgramState::load(path)?, None)
        }
        None => {
            println!("Optimizing prompts...");
            let started = Instant::now();
            let compiled = LabeledFewShot::new(args.k, cfg.categories.clone())
                .compile(&ProgramState::predict(), &examples)?;
            let secs = started.elapsed().as_secs_f64();
            println!("Optimization completed in {:.1}s", secs);
            if let Some(out) = &args.save_program {
                compiled.save(out)?;
                println!("Optimized program saved to '{}'", out.display());
            }
            (compiled, Some(secs))
        }
    };

    let client = build_client(&args.common)?;
    let ctx = prompt_context(&cfg, client);

    let mut classifiers: Vec<Box<dyn Classifier>> =
        [Variant::Direct, Variant::Reasoned, Variant::Predict, Variant::Cot]
            .into_iter()
            .filter_map(|variant| builtin_classifier(variant, ctx.clone()))
            .collect();
    classifiers.push(Box::new(ProgramClassifier::new(
        "Program (optimized)",
        ctx,
        optimized,
    )));

    println!("Evaluating models...");
    let mut reports = Vec::with_capacity(classifiers.len());
    for classifier in &classifiers {
        let report = evaluate(classifier.as_ref(), &examples).await?;
        print_report(&report);
        reports.push(report);
    }
    print!("{}", format_summary(&reports, optimization_secs));

    if let Some(out) = &args.output {
        let summary = Summary::new(
            &cfg.dataset,
            examples.len(),
            args.common.provider.as_str(),
            cfg.classification.model.clone(),
        )
        .with_results(reports)
        .with_optimization_secs(optimization_secs);
        if let Some(best) = summary.best() {
            tracing::info!(best = %best.name, accuracy = best.accuracy, "comparison finished");
        }
        write_summary(&summary, out)?;
        println!("Summary written to '{}'", out.display());
    }
    Ok(EXIT_SUCCESS)
}
