//! CSV matrix output
//!
//! Header: every shingle in sorted order, then `key`. One row per mutant,
//! sorted by identifier: counts in header order, then the identifier.
//! Ordering depends only on content, so equal tables export byte-identical.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::aggregate::CorpusSnapshot;
use crate::error::{Result, ShingleError};
use crate::shingle::FrequencyVector;

const SEPARATOR: char = ',';
const KEY_COLUMN: &str = "key";

/// CSV formatter for a frozen corpus table
#[derive(Debug)]
pub struct MatrixCsvOutput<'a> {
    snapshot: &'a CorpusSnapshot,
}

impl<'a> MatrixCsvOutput<'a> {
    pub fn new(snapshot: &'a CorpusSnapshot) -> Self {
        debug_assert!(snapshot.index().shingles().windows(2).all(|w| w[0] < w[1]));
        Self { snapshot }
    }

    /// Header row without line terminator
    pub fn header(&self) -> String {
        let shingles = self.snapshot.index().shingles();
        let mut header = String::with_capacity(shingles.len() * (shingles[0].len() + 1) + 4);
        for shingle in shingles {
            header.push_str(shingle);
            header.push(SEPARATOR);
        }
        header.push_str(KEY_COLUMN);
        header
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(SEPARATOR) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format one mutant as a complete line, terminator included
    fn format_row(key: &str, freq: &FrequencyVector) -> String {
        let mut line = String::with_capacity(freq.len() * 2 + key.len() + 2);
        for count in freq.counts() {
            line.push_str(&count.to_string());
            line.push(SEPARATOR);
        }
        line.push_str(&Self::escape_field(key));
        line.push('\n');
        line
    }

    /// Write the whole matrix; each row goes out in a single `write_all`
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let mut header = self.header();
        header.push('\n');
        writer.write_all(header.as_bytes())?;

        for (key, freq) in self.snapshot.sorted_rows() {
            writer.write_all(Self::format_row(key, freq).as_bytes())?;
        }

        writer.flush()
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut csv = self.header();
        csv.push('\n');
        for (key, freq) in self.snapshot.sorted_rows() {
            csv.push_str(&Self::format_row(key, freq));
        }
        csv
    }

    /// Write the matrix to `path` atomically
    ///
    /// Rows go to a temporary file in the destination directory which is then
    /// renamed over `path`. On failure the destination is left as it was.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir).map_err(|e| ShingleError::io(parent_dir, e))?;

        let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| ShingleError::io(path, e))?;
        self.write_to(BufWriter::new(temp_file.as_file()))
            .map_err(|e| ShingleError::io(path, e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| ShingleError::io(path, e))?;
        temp_file
            .persist(path)
            .map_err(|e| ShingleError::io(path, e.error))?;

        info!(
            path = %path.display(),
            rows = self.snapshot.len(),
            columns = self.snapshot.index().len(),
            "matrix written"
        );
        Ok(())
    }
}
