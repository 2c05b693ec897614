//! File I/O
//!
//! Reads G-code files line by line without ever failing on encoding:
//! invalid UTF-8 sequences are replaced, `\n` and `\r\n` terminators are
//! stripped, and every line reports how many raw bytes it consumed so a
//! scan can express progress against the file size.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use gcodescan_core::{AnalysisError, Result};

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// G-code file reader with streaming support
#[derive(Debug, Clone)]
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Create a new G-code file reader
    ///
    /// # Errors
    /// Returns an error if the path does not exist or is not a regular file
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(AnalysisError::InvalidInput {
                reason: format!("File does not exist: {}", path.display()),
            }
            .into());
        }

        if !path.is_file() {
            return Err(AnalysisError::InvalidInput {
                reason: format!("Path is not a file: {}", path.display()),
            }
            .into());
        }

        let file_size = fs::metadata(&path)?.len();
        Ok(Self { path, file_size })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file and iterate over its lines
    pub fn lines(&self) -> Result<LossyLines<BufReader<File>>> {
        let file = File::open(&self.path)?;
        Ok(LossyLines::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            file,
        )))
    }
}

/// Iterator over the lines of a reader, decoded lossily
///
/// Yields each line without its terminator, together with the number of
/// raw bytes it occupied in the input.
#[derive(Debug)]
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = Result<(String, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        let consumed = match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => return None,
            Ok(n) => n as u64,
            Err(err) => return Some(Err(err.into())),
        };

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Some(Ok((String::from_utf8_lossy(&self.buf).into_owned(), consumed)))
    }
}
