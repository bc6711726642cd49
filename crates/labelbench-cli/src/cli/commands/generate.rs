use super::super::args::GenerateArgs;
use super::client_builder::{build_client, resolve_config};
use crate::exit_codes::EXIT_SUCCESS;
use labelbench_core::dataset::{load_or_create, Generator};

pub(crate) async fn run(args: GenerateArgs) -> anyhow::Result<i32> {
    let mut cfg = resolve_config(&args.common)?;
    if let Some(n) = args.per_category {
        cfg.generation.per_category = n;
    }
    cfg.validate()?;

    if cfg.dataset.exists() {
        println!(
            "Training examples file already exists ({}), skipping generation.",
            cfg.dataset.display()
        );
        return Ok(EXIT_SUCCESS);
    }

    let client = build_client(&args.common)?;
    let generator = Generator::new(client, cfg.generation.clone(), cfg.categories.clone());
    let examples = load_or_create(&cfg.dataset, &generator).await?;
    println!(
        "Generated {} total training examples -> {}",
        examples.len(),
        cfg.dataset.display()
    );
    Ok(EXIT_SUCCESS)
}
