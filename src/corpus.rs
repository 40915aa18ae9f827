//! Labeled time-series corpus loading
//!
//! Reads the UCR archive text layout: one series per line, class label first,
//! values after it, separated by whitespace and/or commas.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{Result, ShingleError};

/// Series grouped by class label
///
/// Classes iterate in label order; series keep their file order within a class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledCorpus {
    classes: BTreeMap<String, Vec<Vec<f64>>>,
}

/// Shape summary of a corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub classes: usize,
    pub series: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub series_per_class: BTreeMap<String, usize>,
}

impl LabeledCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a series to `label`'s class
    pub fn push(&mut self, label: impl Into<String>, series: Vec<f64>) {
        self.classes.entry(label.into()).or_default().push(series);
    }

    /// Classes and their series, in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<f64>])> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn series_count(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn stats(&self) -> CorpusStats {
        let lengths = self.classes.values().flatten().map(Vec::len);
        CorpusStats {
            classes: self.class_count(),
            series: self.series_count(),
            min_length: lengths.clone().min().unwrap_or(0),
            max_length: lengths.max().unwrap_or(0),
            series_per_class: self
                .classes
                .iter()
                .map(|(k, v)| (k.clone(), v.len()))
                .collect(),
        }
    }
}

/// Source of a labeled corpus
pub trait CorpusLoader {
    fn load(&self, path: &Path) -> Result<LabeledCorpus>;
}

/// Loader for UCR-formatted text files
#[derive(Debug, Clone, Copy, Default)]
pub struct UcrLoader;

impl UcrLoader {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a class label: numeric labels lose their float formatting
    /// (`1.0000000e+00` becomes `1`), anything else is kept verbatim
    fn normalize_label(raw: &str) -> String {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                format!("{}", v as i64)
            }
            _ => raw.to_string(),
        }
    }

    /// Parse UCR text; `path` is only used in error messages
    pub fn parse_str(&self, text: &str, path: &Path) -> Result<LabeledCorpus> {
        let mut corpus = LabeledCorpus::new();

        for (line_no, line) in text.lines().enumerate() {
            let mut fields = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|f| !f.is_empty());

            let Some(label) = fields.next() else {
                continue;
            };

            let series = fields
                .map(|f| {
                    f.parse::<f64>().map_err(|_| ShingleError::CorpusFormat {
                        path: path.to_path_buf(),
                        line: line_no + 1,
                        reason: format!("'{}' is not a number", f),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            if series.is_empty() {
                return Err(ShingleError::CorpusFormat {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                    reason: format!("label '{}' has no values", label),
                });
            }

            corpus.push(Self::normalize_label(label), series);
        }

        Ok(corpus)
    }
}

impl CorpusLoader for UcrLoader {
    fn load(&self, path: &Path) -> Result<LabeledCorpus> {
        let text = std::fs::read_to_string(path).map_err(|e| ShingleError::io(path, e))?;
        let corpus = self.parse_str(&text, path)?;

        let stats = corpus.stats();
        info!(
            path = %path.display(),
            classes = stats.classes,
            series = stats.series,
            min_length = stats.min_length,
            max_length = stats.max_length,
            "corpus loaded"
        );
        Ok(corpus)
    }
}
