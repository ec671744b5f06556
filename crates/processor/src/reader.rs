//! Chunked reading of delimited text files
//!
//! [`CsvChunkReader`] hands out at most `chunk_size` rows at a time so that a
//! file of any length is analyzed with bounded memory.

use crate::error::{ChunkReadError, ReadResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One bounded slice of rows
#[derive(Debug, Clone, PartialEq)]
pub struct RowChunk {
    /// Zero-based chunk position in the file
    pub index: usize,
    pub headers: Vec<String>,
    /// Each row has exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl RowChunk {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of column `index`, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}

/// Reader settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    pub chunk_size: usize,
    pub delimiter: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            chunk_size: 10_000,
            delimiter: b',',
        }
    }
}

/// Streams a delimited file with a header row in fixed-size row chunks
pub struct CsvChunkReader<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    chunk_size: usize,
    next_index: usize,
    finished: bool,
}

impl CsvChunkReader<File> {
    /// Open a file on disk
    pub fn from_path(path: impl AsRef<Path>, options: ReaderOptions) -> ReadResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, options)
    }
}

impl<R: Read> CsvChunkReader<R> {
    pub fn from_reader(input: R, options: ReaderOptions) -> ReadResult<Self> {
        if options.chunk_size == 0 {
            return Err(ChunkReadError::InvalidChunkSize {
                size: options.chunk_size,
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let raw_headers = reader.headers()?.clone();
        if raw_headers.is_empty() || raw_headers.iter().all(str::is_empty) {
            return Err(ChunkReadError::EmptyHeader);
        }

        Ok(Self {
            reader,
            headers: normalize_headers(raw_headers.iter()),
            chunk_size: options.chunk_size,
            next_index: 0,
            finished: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Read the next chunk; `None` once the input is exhausted
    pub fn next_chunk(&mut self) -> ReadResult<Option<RowChunk>> {
        if self.finished {
            return Ok(None);
        }

        let width = self.headers.len();
        let mut rows = Vec::with_capacity(self.chunk_size.min(4096));
        let mut record = csv::StringRecord::new();

        while rows.len() < self.chunk_size {
            if !self.reader.read_record(&mut record)? {
                self.finished = true;
                break;
            }

            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Ok(None);
        }

        let chunk = RowChunk {
            index: self.next_index,
            headers: self.headers.clone(),
            rows,
        };
        self.next_index += 1;
        Ok(Some(chunk))
    }
}

impl<R: Read> Iterator for CsvChunkReader<R> {
    type Item = ReadResult<RowChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => None,
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Blank names become `Unnamed: <i>`, repeats get a `.<n>` suffix
fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.enumerate()
        .map(|(i, name)| {
            let base = if name.is_empty() {
                format!("Unnamed: {i}")
            } else {
                name.to_string()
            };
            let occurrences = seen.entry(base.clone()).or_insert(0);
            let header = if *occurrences == 0 {
                base
            } else {
                format!("{base}.{occurrences}")
            };
            *occurrences += 1;
            header
        })
        .collect()
}
