//! CLI argument parsing for shingler

use std::path::PathBuf;

use clap::Parser;

use crate::config::{NumerosityReduction, PipelineConfig};
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "shingler")]
#[command(version)]
#[command(
    about = "Discretize labeled time series, generate mutants, and export a shingle frequency matrix",
    long_about = None
)]
pub struct Cli {
    /// Labeled time-series corpus (UCR text format: label followed by values)
    #[arg(short = 'i', long = "corpus", value_name = "PATH")]
    pub corpus: PathBuf,

    /// TOML configuration file; command-line flags override its values
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Matrix output file (default: shingled_mutant_CBF.txt)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Sliding window size for discretization (default: 60)
    #[arg(long = "window-size", value_name = "N")]
    pub window_size: Option<usize>,

    /// PAA segments per window, also the shingling word length (default: 6)
    #[arg(long = "paa-size", value_name = "N")]
    pub paa_size: Option<usize>,

    /// SAX alphabet size (default: 5)
    #[arg(long = "alphabet-size", value_name = "N")]
    pub alphabet_size: Option<usize>,

    /// Z-normalization threshold (default: 0.01)
    #[arg(long = "norm-threshold", value_name = "F")]
    pub norm_threshold: Option<f64>,

    /// Numerosity reduction policy (default: none)
    #[arg(long = "numerosity-reduction", value_enum, value_name = "POLICY")]
    pub numerosity_reduction: Option<NumerosityReduction>,

    /// Shingle length (default: 4)
    #[arg(short = 'k', long = "shingle-length", value_name = "N")]
    pub shingle_length: Option<usize>,

    /// Mutants generated per series (default: 1000)
    #[arg(short = 'm', long = "mutants", value_name = "N")]
    pub mutants: Option<usize>,

    /// Print a JSON run summary to stdout after writing the matrix
    #[arg(long = "summary")]
    pub summary: bool,

    /// Enable trace-level logging
    #[arg(long = "debug", conflicts_with = "quiet")]
    pub debug: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Defaults, then the config file (if any), then command-line flags
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)?,
            None => PipelineConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Overwrite `config` fields with any flags given on the command line
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(v) = self.window_size {
            config.window_size = v;
        }
        if let Some(v) = self.paa_size {
            config.paa_size = v;
        }
        if let Some(v) = self.alphabet_size {
            config.alphabet_size = v;
        }
        if let Some(v) = self.norm_threshold {
            config.normalization_threshold = v;
        }
        if let Some(v) = self.numerosity_reduction {
            config.numerosity_reduction = v;
        }
        if let Some(v) = self.shingle_length {
            config.shingle_length = v;
        }
        if let Some(v) = self.mutants {
            config.mutants_per_series = v;
        }
    }
}
