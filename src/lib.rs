//! Shingler - symbolic mutant shingling for time-series classification
//!
//! Converts a labeled corpus of real-valued time series into a fixed-width
//! integer feature matrix: each series is discretized with SAX, expanded into
//! many mutants, and every mutant becomes one row of shingle counts over the
//! complete, sorted shingle vocabulary.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod mutator;
pub mod pipeline;
pub mod sax;
pub mod shingle;

pub use aggregate::{CorpusSnapshot, ShingleAggregator};
pub use config::{MutationConfig, NumerosityReduction, PipelineConfig};
pub use corpus::{CorpusLoader, LabeledCorpus, UcrLoader};
pub use csv_output::MatrixCsvOutput;
pub use error::{ErrorKind, Result, ShingleError};
pub use json_output::RunSummary;
pub use mutator::{Mutator, RosslerMutator};
pub use pipeline::{Pipeline, PipelineOutput};
pub use sax::{DiscretizationParams, Discretizer, SaxDiscretizer};
pub use shingle::{count_word_shingles, FrequencyVector, ShingleIndex};
