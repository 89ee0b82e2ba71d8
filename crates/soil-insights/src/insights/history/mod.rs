mod parser;

use super::readings::ReadingSnapshot;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ReadingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidTimestamp { line: u64, value: String },
}

impl std::fmt::Display for ReadingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingImportError::Io(err) => write!(f, "failed to read reading history: {}", err),
            ReadingImportError::Csv(err) => write!(f, "invalid reading history CSV: {}", err),
            ReadingImportError::InvalidTimestamp { line, value } => write!(
                f,
                "line {}: '{}' is not an RFC 3339 timestamp or YYYY-MM-DD date",
                line, value
            ),
        }
    }
}

impl std::error::Error for ReadingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadingImportError::Io(err) => Some(err),
            ReadingImportError::Csv(err) => Some(err),
            ReadingImportError::InvalidTimestamp { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReadingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReadingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedReading {
    pub recorded_at: NaiveDateTime,
    pub snapshot: ReadingSnapshot,
}

/// Timestamped readings imported from a sensor export, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingHistory {
    entries: Vec<TimedReading>,
}

impl ReadingHistory {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReadingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Expects a `time` column plus any of `temperature`, `moisture`, `ph`,
    /// `ec`, `nitrogen`, `phosphorus`, `potassium`. Blank cells are not measured.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReadingImportError> {
        let mut entries = Vec::new();

        for row in parser::parse_rows(reader)? {
            let recorded_at = row
                .recorded_at
                .ok_or_else(|| ReadingImportError::InvalidTimestamp {
                    line: row.line,
                    value: row.raw_time.clone(),
                })?;
            entries.push(TimedReading {
                recorded_at,
                snapshot: row.snapshot,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TimedReading] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry; on equal timestamps the later row wins.
    pub fn latest(&self) -> Option<&TimedReading> {
        self.entries.iter().max_by_key(|entry| entry.recorded_at)
    }
}
