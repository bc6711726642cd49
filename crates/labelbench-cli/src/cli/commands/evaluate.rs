use super::super::args::{EvaluateArgs, Variant};
use super::client_builder::{build_client, prompt_context, resolve_config};
use super::load_dataset_or_exit;
use crate::exit_codes::{EXIT_MISSING_INPUT, EXIT_SUCCESS};
use labelbench_core::classify::{
    Classifier, DirectClassifier, ProgramClassifier, ProgramState, PromptContext,
    ReasonedClassifier,
};
use labelbench_core::engine::evaluate;
use labelbench_core::report::console::print_report;

/// Classifiers that need nothing beyond the prompt context. `Program` needs
/// an artifact and is built by the caller.
pub(crate) fn builtin_classifier(
    variant: Variant,
    ctx: PromptContext,
) -> Option<Box<dyn Classifier>> {
    let classifier: Box<dyn Classifier> = match variant {
        Variant::Direct => Box::new(DirectClassifier::new(ctx)),
        Variant::Reasoned => Box::new(ReasonedClassifier::new(ctx)),
        Variant::Predict => Box::new(ProgramClassifier::new(
            "Program (zero-shot)",
            ctx,
            ProgramState::predict(),
        )),
        Variant::Cot => Box::new(ProgramClassifier::new(
            "Program (chain of thought)",
            ctx,
            ProgramState::chain_of_thought(),
        )),
        Variant::Program => return None,
    };
    Some(classifier)
}

pub(crate) async fn run(args: EvaluateArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(&args.common)?;
    let examples = match load_dataset_or_exit(&cfg.dataset)? {
        Ok(examples) => examples,
        Err(code) => return Ok(code),
    };

    if args.variant == Variant::Program && !args.program.exists() {
        eprintln!(
            "Program artifact not found: {}. Run `labelbench optimize` first.",
            args.program.display()
        );
        return Ok(EXIT_MISSING_INPUT);
    }

    let client = build_client(&args.common)?;
    let ctx = prompt_context(&cfg, client);
    let classifier: Box<dyn Classifier> = match builtin_classifier(args.variant, ctx.clone()) {
        Some(classifier) => classifier,
        None => Box::new(ProgramClassifier::new(
            format!("Program ({})", args.program.display()),
            ctx,
            ProgramState::load(&args.program)?,
        )),
    };

    tracing::info!(examples = examples.len(), classifier = classifier.name(), "evaluating");
    let report = evaluate(classifier.as_ref(), &examples).await?;
    print_report(&report);
    Ok(EXIT_SUCCESS)
}
