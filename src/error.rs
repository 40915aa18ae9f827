//! Error types for the shingling pipeline
//!
//! Every failure is fatal for a run: nothing here is retried or recovered.
//! `ErrorKind` groups variants into the four classes callers branch on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`ShingleError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid parameters, detected before any processing starts
    Configuration,
    /// Malformed symbolic string, duplicate mutant identifier, or malformed corpus row
    Format,
    /// Corpus unreadable or output unwritable
    Io,
    /// Discretizer or mutator failed
    Upstream,
}

/// Errors produced by the shingling pipeline
#[derive(Error, Debug)]
pub enum ShingleError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("string of length {len} is not a multiple of word length {word_length}")]
    LengthNotMultiple { len: usize, word_length: usize },

    #[error("symbol '{symbol}' at position {position} is outside the {alphabet_size}-letter alphabet")]
    UnknownSymbol {
        symbol: char,
        position: usize,
        alphabet_size: usize,
    },

    #[error("duplicate mutant identifier '{0}'")]
    DuplicateKey(String),

    #[error("mutant '{key}' rejected: {source}")]
    InvalidMutant {
        key: String,
        #[source]
        source: Box<ShingleError>,
    },

    #[error("malformed corpus '{}' at line {line}: {reason}", .path.display())]
    CorpusFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("discretization failed: {0}")]
    Discretization(String),

    #[error("mutation failed: {0}")]
    Mutation(String),

    #[error("series '{key}': {source}")]
    Series {
        key: String,
        #[source]
        source: Box<ShingleError>,
    },
}

impl ShingleError {
    /// Classify this error; context wrappers report the kind of what they wrap
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShingleError::Configuration(_) => ErrorKind::Configuration,
            ShingleError::LengthNotMultiple { .. }
            | ShingleError::UnknownSymbol { .. }
            | ShingleError::DuplicateKey(_)
            | ShingleError::CorpusFormat { .. } => ErrorKind::Format,
            ShingleError::Io { .. } => ErrorKind::Io,
            ShingleError::Discretization(_) | ShingleError::Mutation(_) => ErrorKind::Upstream,
            ShingleError::InvalidMutant { source, .. } | ShingleError::Series { source, .. } => {
                source.kind()
            }
        }
    }

    /// Attach an I/O error to the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ShingleError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, ShingleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_plain_variants() {
        assert_eq!(
            ShingleError::Configuration("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(ShingleError::DuplicateKey("a_0_1".into()).kind(), ErrorKind::Format);
        assert_eq!(
            ShingleError::LengthNotMultiple {
                len: 5,
                word_length: 4
            }
            .kind(),
            ErrorKind::Format
        );
        assert_eq!(ShingleError::Mutation("empty".into()).kind(), ErrorKind::Upstream);
    }

    #[test]
    fn test_kind_passes_through_wrappers() {
        let inner = ShingleError::Discretization("too short".into());
        let wrapped = ShingleError::Series {
            key: "1_0".into(),
            source: Box::new(inner),
        };
        assert_eq!(wrapped.kind(), ErrorKind::Upstream);
        assert!(wrapped.to_string().contains("1_0"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = ShingleError::io(
            "/no/such/file",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/no/such/file"));
    }

    #[test]
    fn test_invalid_mutant_message_names_key() {
        let err = ShingleError::InvalidMutant {
            key: "2_3_17".into(),
            source: Box::new(ShingleError::UnknownSymbol {
                symbol: 'z',
                position: 4,
                alphabet_size: 5,
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("2_3_17"));
        assert!(msg.contains("'z'"));
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
