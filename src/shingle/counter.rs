use super::index::ShingleIndex;
use crate::error::{Result, ShingleError};

/// Dense shingle histogram, one counter per `ShingleIndex` column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyVector {
    counts: Vec<u32>,
}

impl FrequencyVector {
    /// All-zero vector with `columns` entries
    pub fn zeros(columns: usize) -> Self {
        Self {
            counts: vec![0; columns],
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count at `column`
    pub fn get(&self, column: usize) -> Option<u32> {
        self.counts.get(column).copied()
    }

    /// Total shingle occurrences
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    #[inline]
    fn bump(&mut self, column: usize) {
        self.counts[column] += 1;
    }
}

/// Count overlapping shingles inside each non-overlapping word of a SAX string
///
/// The string is split into `len / word_length` words; within each word a
/// window of `K` symbols slides with stride 1, so every word contributes
/// `word_length - K + 1` shingles.
///
/// # Arguments
/// * `sax` - Symbolic string, length a multiple of `word_length`
/// * `word_length` - SAX word length (the discretizer's PAA size)
/// * `index` - Shingle index defining columns and alphabet
///
/// # Errors
/// `LengthNotMultiple` if the string does not split into whole words (no
/// truncation, no padding); `UnknownSymbol` for a symbol outside the alphabet;
/// `Configuration` if `word_length` is shorter than the shingle length.
///
/// # Example
/// ```
/// use shingler::shingle::{count_word_shingles, ShingleIndex};
///
/// let index = ShingleIndex::new(5, 2).unwrap();
/// let freq = count_word_shingles("abab", 4, &index).unwrap();
///
/// assert_eq!(freq.get(index.position("ab").unwrap()), Some(2));
/// assert_eq!(freq.get(index.position("ba").unwrap()), Some(1));
/// assert_eq!(freq.total(), 3);
/// ```
pub fn count_word_shingles(
    sax: &str,
    word_length: usize,
    index: &ShingleIndex,
) -> Result<FrequencyVector> {
    index.check_word_length(word_length)?;

    let alphabet = index.alphabet();
    let codes = sax
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            alphabet
                .index_of(symbol)
                .ok_or(ShingleError::UnknownSymbol {
                    symbol,
                    position,
                    alphabet_size: alphabet.size(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    if codes.len() % word_length != 0 {
        return Err(ShingleError::LengthNotMultiple {
            len: codes.len(),
            word_length,
        });
    }

    let mut freq = FrequencyVector::zeros(index.len());
    for word in codes.chunks_exact(word_length) {
        for shingle in word.windows(index.shingle_length()) {
            freq.bump(index.column_of_codes(shingle));
        }
    }

    Ok(freq)
}
