//! Delimited row reading with header sniffing.
//!
//! [`RowReader`] yields decoded rows from a dataset file, skipping rows whose
//! fields are all blank. Whether the first record is a header is decided by
//! [`looks_like_header`] on the first physical line: if the lower-cased line
//! contains any of [`HEADER_KEYWORDS`] as a substring, the first record is
//! dropped.
//!
//! The check is a plain substring test, so a first data line that happens to
//! contain one of the keywords (a title with "id" in it, for instance) is
//! also dropped. This matches how existing exports have been processed and is
//! kept on purpose.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use csv::ByteRecord;
use encoding_rs::Encoding;
use log::debug;

use crate::io_utils;

pub const HEADER_KEYWORDS: &[&str] = &[
    "id",
    "title",
    "user_id",
    "movie_id",
    "rating",
    "timestamp",
    "name",
    "email",
];

pub type RawRow = Vec<String>;

pub fn looks_like_header(line: &str) -> bool {
    let lowered = line.to_lowercase();
    HEADER_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Reads the first physical line of `path` and applies [`looks_like_header`].
pub fn sniff_header(path: &Path, encoding: &'static Encoding) -> Result<bool> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let mut reader = BufReader::new(file);
    let mut first_line = Vec::new();
    reader
        .read_until(b'\n', &mut first_line)
        .with_context(|| format!("Reading first line of {path:?}"))?;
    let (text, _, _) = encoding.decode(&first_line);
    Ok(looks_like_header(&text))
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

pub struct RowReader {
    path: PathBuf,
    reader: csv::Reader<BufReader<File>>,
    encoding: &'static Encoding,
    record: ByteRecord,
    pending_header: bool,
}

impl RowReader {
    pub fn open(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let has_header = sniff_header(path, encoding)?;
        debug!(
            "{:?}: header line {}",
            path,
            if has_header { "detected" } else { "not detected" }
        );
        let reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            encoding,
            record: ByteRecord::new(),
            pending_header: has_header,
        })
    }

    fn read_next(&mut self) -> Result<Option<RawRow>> {
        loop {
            let line = self.reader.position().line();
            let more = self
                .reader
                .read_byte_record(&mut self.record)
                .with_context(|| format!("Reading line {} of {:?}", line, self.path))?;
            if !more {
                return Ok(None);
            }
            if self.pending_header {
                self.pending_header = false;
                continue;
            }
            let row = io_utils::decode_record(&self.record, self.encoding)
                .with_context(|| format!("Decoding line {} of {:?}", line, self.path))?;
            if !is_blank_row(&row) {
                return Ok(Some(row));
            }
        }
    }
}

impl Iterator for RowReader {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Reads every non-blank data row of `path` into memory.
pub fn read_rows(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Vec<RawRow>> {
    RowReader::open(path, delimiter, encoding)?.collect()
}
