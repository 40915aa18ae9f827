use crate::error::{Result, ShingleError};

/// Upper bound on `alphabet_size ^ shingle_length`
///
/// Each mutant carries a dense vector of this many counters.
pub const MAX_COLUMNS: usize = 1 << 20;

/// Ordered SAX alphabet: `a`, `b`, `c`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Create an alphabet of `size` lowercase letters
    pub fn new(size: usize) -> Result<Self> {
        if !(1..=26).contains(&size) {
            return Err(ShingleError::Configuration(format!(
                "alphabet size must be in [1, 26], got {}",
                size
            )));
        }
        let symbols = (b'a'..).take(size).map(char::from).collect();
        Ok(Self { symbols })
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Symbol at position `idx` (0 = `a`)
    pub fn symbol(&self, idx: usize) -> Option<char> {
        self.symbols.get(idx).copied()
    }

    /// Position of `symbol` in the alphabet, if it belongs to it
    #[inline]
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        if !symbol.is_ascii_lowercase() {
            return None;
        }
        let idx = (symbol as u8 - b'a') as usize;
        (idx < self.symbols.len()).then_some(idx)
    }
}

/// Complete, lexicographically ordered enumeration of all shingles
///
/// Column `i` holds the shingle whose symbols, read as base-`A` digits, spell
/// `i`. With `a < b < c ...` that numbering is exactly lexicographic order,
/// so column lookup needs no hash table.
///
/// # Example
/// ```
/// use shingler::shingle::ShingleIndex;
///
/// let index = ShingleIndex::new(5, 2).unwrap();
/// assert_eq!(index.len(), 25);
/// assert_eq!(index.shingles()[0], "aa");
/// assert_eq!(index.position("ab"), Some(1));
/// assert_eq!(index.position("ea"), Some(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShingleIndex {
    alphabet: Alphabet,
    shingle_length: usize,
    shingles: Vec<String>,
}

impl ShingleIndex {
    /// Enumerate every shingle of `shingle_length` symbols over `alphabet_size` symbols
    pub fn new(alphabet_size: usize, shingle_length: usize) -> Result<Self> {
        let alphabet = Alphabet::new(alphabet_size)?;
        if shingle_length < 1 {
            return Err(ShingleError::Configuration(
                "shingle length must be >= 1, got 0".to_string(),
            ));
        }

        let columns = u32::try_from(shingle_length)
            .ok()
            .and_then(|k| alphabet_size.checked_pow(k))
            .filter(|&n| n <= MAX_COLUMNS)
            .ok_or_else(|| {
                ShingleError::Configuration(format!(
                    "{}^{} shingle columns exceeds the limit of {}",
                    alphabet_size, shingle_length, MAX_COLUMNS
                ))
            })?;

        let mut shingles = Vec::with_capacity(columns);
        let mut buf = vec!['a'; shingle_length];
        for column in 0..columns {
            let mut rest = column;
            for slot in buf.iter_mut().rev() {
                *slot = alphabet.symbols[rest % alphabet_size];
                rest /= alphabet_size;
            }
            shingles.push(buf.iter().collect());
        }

        Ok(Self {
            alphabet,
            shingle_length,
            shingles,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn shingle_length(&self) -> usize {
        self.shingle_length
    }

    /// Number of columns (`A^K`)
    pub fn len(&self) -> usize {
        self.shingles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shingles.is_empty()
    }

    /// All shingles in column order
    pub fn shingles(&self) -> &[String] {
        &self.shingles
    }

    /// Column of a shingle given as alphabet positions
    #[inline]
    pub(crate) fn column_of_codes(&self, codes: &[usize]) -> usize {
        let base = self.alphabet.size();
        codes.iter().fold(0, |acc, &c| acc * base + c)
    }

    /// Column of a shingle string, or `None` if it is not a valid shingle
    pub fn position(&self, shingle: &str) -> Option<usize> {
        let mut codes = Vec::with_capacity(self.shingle_length);
        for symbol in shingle.chars() {
            codes.push(self.alphabet.index_of(symbol)?);
        }
        (codes.len() == self.shingle_length).then(|| self.column_of_codes(&codes))
    }

    /// Ensure words of `word_length` symbols can hold at least one shingle
    pub fn check_word_length(&self, word_length: usize) -> Result<()> {
        if word_length < self.shingle_length {
            return Err(ShingleError::Configuration(format!(
                "word length {} is shorter than shingle length {}",
                word_length, self.shingle_length
            )));
        }
        Ok(())
    }
}
