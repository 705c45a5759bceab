use anyhow::{Context, Result};
use clap::Parser;
use mpiscale::charts;
use mpiscale::cli::Cli;
use mpiscale::config::ScalingConfig;
use mpiscale::pipeline::ScalingPipeline;
use mpiscale::report;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber.
///
/// Warnings (skipped artifacts, duplicate runtimes) are always shown on
/// stderr; `RUST_LOG` refines the filter and `--debug` enables everything.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = ScalingConfig::resolve(&args)?;
    tracing::debug!("effective configuration: {:?}", config);

    // Fatal pipeline errors surface here, before anything is emitted
    let outcome = ScalingPipeline::new(config.pipeline_config())
        .run()
        .with_context(|| {
            format!(
                "Cannot compute speedup from {}",
                config.artifact_dir.display()
            )
        })?;

    if !outcome.skipped.is_empty() {
        eprintln!(
            "Warning: skipped {} artifact(s) with no usable runtime",
            outcome.skipped.len()
        );
    }
    if !outcome.overwrites.is_empty() {
        eprintln!(
            "Warning: {} duplicate runtime(s) replaced, last file wins:",
            outcome.overwrites.len()
        );
        for overwrite in &outcome.overwrites {
            eprintln!(
                "  NP={} taken from {} (replaced {}s)",
                overwrite.process_count,
                overwrite.path.display(),
                overwrite.previous_runtime
            );
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&outcome.table, config.format, &mut out)
        .context("Failed to write report")?;
    out.flush()?;

    if config.charts {
        charts::render_charts(&outcome.table, &config.output_dir)?;
        eprintln!("Charts saved in {}", config.output_dir.display());
    }

    Ok(())
}
