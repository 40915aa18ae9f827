use anyhow::{Context, Result};
use clap::Parser;
use shingler::cli::Cli;
use shingler::{CorpusLoader, MatrixCsvOutput, Pipeline, RosslerMutator, SaxDiscretizer, UcrLoader};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `RUST_LOG` wins over the default level
fn init_tracing(debug: bool, quiet: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug, args.quiet);

    let config = args.resolve_config()?;
    config.validate()?;

    let corpus = UcrLoader::new().load(&args.corpus)?;
    if corpus.is_empty() {
        anyhow::bail!("corpus '{}' contains no series", args.corpus.display());
    }

    let mutator = RosslerMutator::new(config.mutation.clone(), config.alphabet_size)?;
    let pipeline = Pipeline::new(config, SaxDiscretizer::new(), mutator)?;
    let mut output = pipeline
        .run(&corpus)
        .with_context(|| format!("processing corpus '{}'", args.corpus.display()))?;

    let path = pipeline.config().output.clone();
    MatrixCsvOutput::new(&output.snapshot).write_atomic(&path)?;

    if args.summary {
        output.summary.output = Some(path);
        println!("{}", output.summary.to_json()?);
    }

    Ok(())
}
