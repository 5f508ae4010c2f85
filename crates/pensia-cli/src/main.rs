use anyhow::{bail, Context};
use clap::Parser;
use pensia_core::checkers::all_checkers;
use pensia_core::{ValidationConfig, Validator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod batch;
mod cli;
mod output;

use batch::{collect_inputs, Batch};
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pensia=debug,pensia_core=debug"
    } else {
        "pensia=info,pensia_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.list_checkers {
        for checker in all_checkers() {
            println!("{}\t{}", checker.name(), checker.description());
        }
        return Ok(());
    }

    if !cli.out.is_dir() {
        bail!("{} is not a directory", cli.out.display());
    }

    let mut config = match &cli.config {
        Some(path) => ValidationConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ValidationConfig::default(),
    };
    for name in &cli.skip {
        config = config.disable(name.as_str());
    }
    let validator = Validator::new(config)?;

    let files = collect_inputs(&cli.inputs)?;
    let batch = Batch {
        validator,
        out_dir: cli.out.clone(),
        format: cli.format,
        check_schema: !cli.no_schema,
    };

    let summary = batch.run(&files);
    tracing::info!(
        checked = summary.checked,
        failed = summary.failed,
        problems = summary.problems,
        "Batch complete"
    );

    Ok(())
}
