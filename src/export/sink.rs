use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{CommitRecord, PullRequestRecord};

/// A record type with a fixed CSV header.
pub trait CsvRow: Serialize {
    const HEADER: &'static [&'static str];
}

impl CsvRow for CommitRecord {
    const HEADER: &'static [&'static str] = &["SHA", "Author", "Date", "Message"];
}

impl CsvRow for PullRequestRecord {
    const HEADER: &'static [&'static str] = &["PR Number", "Title", "Author", "State"];
}

/// Writes a header row plus one row per record, replacing any existing file.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_records<T: CsvRow>(&self, records: &[T]) -> Result<usize> {
        let file = File::create(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(T::HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(records.len())
    }
}
