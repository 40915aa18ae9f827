// Shingle Index and Word Shingle Counter
//
// A shingle is a fixed-length run of SAX symbols. Every possible shingle over
// the alphabet gets one column, in lexicographic order, so frequency vectors
// built from different strings always line up column for column.
//
// Strings are cut into non-overlapping words (one SAX word per discretization
// window) and shingles never straddle a word boundary: the last symbol of one
// window and the first of the next are unrelated in the original series.

mod counter;
mod index;

pub use counter::{count_word_shingles, FrequencyVector};
pub use index::{Alphabet, ShingleIndex, MAX_COLUMNS};
