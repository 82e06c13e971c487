//! CSV manifest of forwarded frames.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// How a frame came to be forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardReason {
    /// The frame's own pull decided to forward it.
    Live,
    /// Released from the trailing window by a later trigger.
    Released,
    /// Pulled without filtering.
    Passthrough,
}

/// One row of the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestRecord {
    /// Pull number the frame was returned on, starting at 1.
    pub pull: u64,
    /// Frame name.
    pub frame: String,
    /// Capture timestamp (RFC 3339).
    pub captured_at: String,
    /// Why the frame was forwarded.
    pub reason: ForwardReason,
}

impl ManifestRecord {
    /// Build a record.
    pub fn new(
        pull: u64,
        frame: impl Into<String>,
        captured_at: DateTime<Utc>,
        reason: ForwardReason,
    ) -> Self {
        Self {
            pull,
            frame: frame.into(),
            captured_at: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            reason,
        }
    }
}

/// Writes [`ManifestRecord`]s to a CSV file.
pub struct ManifestWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl ManifestWriter {
    /// Create the manifest at `path`, truncating any existing file.
    pub fn create(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(|e| manifest_error(path, e))?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    /// Append one record.
    pub fn write(&mut self, record: &ManifestRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .map_err(|e| manifest_error(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows to disk.
    pub fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn manifest_error(path: &Path, source: csv::Error) -> Error {
    Error::ManifestWrite {
        path: path.to_path_buf(),
        source,
    }
}
