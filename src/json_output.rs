//! JSON run summary
//!
//! Printed by `--summary` after the matrix is written.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What a pipeline run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of classes in the corpus
    pub classes: usize,
    /// Series discretized and mutated
    pub series: usize,
    /// Rows in the matrix
    pub mutants: usize,
    /// Shingle columns in the matrix (excluding `key`)
    pub columns: usize,
    pub alphabet_size: usize,
    pub shingle_length: usize,
    /// SAX word length used to split strings
    pub word_length: usize,
    /// Rows per class label
    pub mutants_per_class: BTreeMap<String, usize>,
    /// Where the matrix was written, once it has been
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl RunSummary {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
