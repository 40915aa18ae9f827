//! Corpus shingle aggregation
//!
//! Holds one frequency vector per mutant identifier. The table is a plain
//! `HashMap`: nothing downstream may depend on its iteration order, the
//! exporter sorts keys itself.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{Result, ShingleError};
use crate::shingle::{count_word_shingles, FrequencyVector, ShingleIndex};

/// Accumulates mutant frequency vectors for a whole run
#[derive(Debug)]
pub struct ShingleAggregator {
    index: ShingleIndex,
    word_length: usize,
    table: HashMap<String, FrequencyVector>,
}

impl ShingleAggregator {
    /// Create an empty aggregator counting words of `word_length` symbols
    pub fn new(index: ShingleIndex, word_length: usize) -> Result<Self> {
        index.check_word_length(word_length)?;
        Ok(Self {
            index,
            word_length,
            table: HashMap::new(),
        })
    }

    pub fn index(&self) -> &ShingleIndex {
        &self.index
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.table.contains_key(id)
    }

    /// Frequency vector stored for `id`
    pub fn get(&self, id: &str) -> Option<&FrequencyVector> {
        self.table.get(id)
    }

    /// Shingle `sax` and store the result under `id`
    ///
    /// Fails with `DuplicateKey` if `id` is already present, or with
    /// `InvalidMutant` (wrapping the counting error) if the string is not
    /// a whole number of words over the alphabet. The table is unchanged
    /// after any failure.
    pub fn insert(&mut self, id: impl Into<String>, sax: &str) -> Result<()> {
        let id = id.into();
        if self.table.contains_key(&id) {
            return Err(ShingleError::DuplicateKey(id));
        }

        let freq = match count_word_shingles(sax, self.word_length, &self.index) {
            Ok(freq) => freq,
            Err(source) => {
                return Err(ShingleError::InvalidMutant {
                    key: id,
                    source: Box::new(source),
                })
            }
        };

        match self.table.entry(id) {
            Entry::Occupied(e) => Err(ShingleError::DuplicateKey(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(freq);
                Ok(())
            }
        }
    }

    /// Freeze the table for export
    pub fn into_snapshot(self) -> CorpusSnapshot {
        CorpusSnapshot {
            index: self.index,
            word_length: self.word_length,
            table: self.table,
        }
    }
}

/// Immutable corpus table plus the index its vectors are aligned to
#[derive(Debug, Clone)]
pub struct CorpusSnapshot {
    index: ShingleIndex,
    word_length: usize,
    table: HashMap<String, FrequencyVector>,
}

impl CorpusSnapshot {
    pub fn index(&self) -> &ShingleIndex {
        &self.index
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FrequencyVector> {
        self.table.get(id)
    }

    /// Mutant identifiers in lexicographic order
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.table.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Rows in lexicographic identifier order
    pub fn sorted_rows(&self) -> impl Iterator<Item = (&str, &FrequencyVector)> + '_ {
        self.sorted_keys()
            .into_iter()
            .filter_map(move |key| self.table.get(key).map(|freq| (key, freq)))
    }
}
