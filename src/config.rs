//! Pipeline configuration
//!
//! Values come from three layers: built-in defaults, an optional TOML file,
//! and command-line overrides (see `cli`). `validate()` runs before any
//! series is touched so a bad parameter never produces a partial matrix.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShingleError};
use crate::sax::breakpoints::MAX_ALPHABET_SIZE;
use crate::shingle::MAX_COLUMNS;

/// Default matrix file name, written to the working directory
pub const DEFAULT_OUTPUT: &str = "shingled_mutant_CBF.txt";

/// Policy for collapsing consecutive repeated SAX words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NumerosityReduction {
    /// Keep every word
    #[default]
    None,
    /// Drop a word identical to the previous kept word
    Exact,
    /// Drop a word within MINDIST zero of the previous kept word
    Mindist,
}

impl fmt::Display for NumerosityReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumerosityReduction::None => "none",
            NumerosityReduction::Exact => "exact",
            NumerosityReduction::Mindist => "mindist",
        };
        f.write_str(name)
    }
}

impl FromStr for NumerosityReduction {
    type Err = ShingleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(NumerosityReduction::None),
            "exact" => Ok(NumerosityReduction::Exact),
            "mindist" => Ok(NumerosityReduction::Mindist),
            other => Err(ShingleError::Configuration(format!(
                "unknown numerosity reduction policy '{}' (expected none, exact or mindist)",
                other
            ))),
        }
    }
}

/// Parameters of the Rössler-driven mutator
///
/// # Example
/// ```
/// use shingler::config::MutationConfig;
///
/// let config = MutationConfig::default();
/// assert_eq!(config.base_c, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Rössler `a` before jitter
    pub base_a: f64,
    /// Rössler `b` before jitter
    pub base_b: f64,
    /// Rössler `c` before jitter
    pub base_c: f64,
    /// Relative jitter applied to each parameter, per mutant
    ///
    /// 0.05 means each parameter is scaled by a factor drawn from `[0.95, 1.05]`.
    pub param_jitter: f64,
    /// Probability that a given symbol is considered for perturbation
    pub mutation_rate: f64,
    /// RK4 integration step
    pub step_size: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            base_a: 0.20,
            base_b: 0.20,
            base_c: 5.0,
            param_jitter: 0.05,
            mutation_rate: 0.1,
            step_size: 0.05,
        }
    }
}

impl MutationConfig {
    /// Validate mutation parameters
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("base_a", self.base_a),
            ("base_b", self.base_b),
            ("base_c", self.base_c),
        ] {
            if !value.is_finite() {
                return Err(ShingleError::Configuration(format!(
                    "mutation.{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.param_jitter) {
            return Err(ShingleError::Configuration(format!(
                "mutation.param_jitter must be in [0, 1], got {}",
                self.param_jitter
            )));
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ShingleError::Configuration(format!(
                "mutation.mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }

        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ShingleError::Configuration(format!(
                "mutation.step_size must be positive, got {}",
                self.step_size
            )));
        }

        Ok(())
    }
}

/// Full pipeline configuration
///
/// # Example
/// ```
/// use shingler::config::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.window_size, 60);
/// assert_eq!(config.paa_size, 6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sliding window length used by the discretizer
    pub window_size: usize,
    /// Segments per window; also the word length used for shingling
    pub paa_size: usize,
    /// Number of symbols in the alphabet
    pub alphabet_size: usize,
    /// Windows with standard deviation below this are not z-normalized
    pub normalization_threshold: f64,
    /// Numerosity reduction applied by the discretizer
    pub numerosity_reduction: NumerosityReduction,
    /// Shingle (k-gram) length
    pub shingle_length: usize,
    /// Mutants generated from each series
    pub mutants_per_series: usize,
    /// Destination of the matrix file
    pub output: PathBuf,
    /// Mutator parameters
    pub mutation: MutationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: 60,
            paa_size: 6,
            alphabet_size: 5,
            normalization_threshold: 0.01,
            numerosity_reduction: NumerosityReduction::None,
            shingle_length: 4,
            mutants_per_series: 1000,
            output: PathBuf::from(DEFAULT_OUTPUT),
            mutation: MutationConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from TOML text; absent keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| ShingleError::Configuration(format!("invalid TOML config: {}", e)))
    }

    /// Load a configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ShingleError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Number of matrix columns (excluding the key column)
    pub fn column_count(&self) -> Option<usize> {
        u32::try_from(self.shingle_length)
            .ok()
            .and_then(|k| self.alphabet_size.checked_pow(k))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.alphabet_size < 1 || self.alphabet_size > MAX_ALPHABET_SIZE {
            return Err(ShingleError::Configuration(format!(
                "alphabet_size must be in [1, {}], got {}",
                MAX_ALPHABET_SIZE, self.alphabet_size
            )));
        }

        if self.shingle_length < 1 {
            return Err(ShingleError::Configuration(
                "shingle_length must be >= 1, got 0".to_string(),
            ));
        }

        if self.paa_size < 1 {
            return Err(ShingleError::Configuration(
                "paa_size must be >= 1, got 0".to_string(),
            ));
        }

        if self.shingle_length > self.paa_size {
            return Err(ShingleError::Configuration(format!(
                "shingle_length ({}) must not exceed the word length paa_size ({})",
                self.shingle_length, self.paa_size
            )));
        }

        if self.window_size < self.paa_size {
            return Err(ShingleError::Configuration(format!(
                "window_size ({}) must be >= paa_size ({})",
                self.window_size, self.paa_size
            )));
        }

        if !(self.normalization_threshold.is_finite() && self.normalization_threshold >= 0.0) {
            return Err(ShingleError::Configuration(format!(
                "normalization_threshold must be a non-negative number, got {}",
                self.normalization_threshold
            )));
        }

        if self.mutants_per_series < 1 {
            return Err(ShingleError::Configuration(
                "mutants_per_series must be >= 1, got 0".to_string(),
            ));
        }

        match self.column_count() {
            Some(columns) if columns <= MAX_COLUMNS => {}
            _ => {
                return Err(ShingleError::Configuration(format!(
                    "{}^{} shingle columns exceeds the limit of {}",
                    self.alphabet_size, self.shingle_length, MAX_COLUMNS
                )))
            }
        }

        self.mutation.validate()
    }
}
