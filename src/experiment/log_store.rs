//! Experiment Log Store - append-only JSON persistence
//!
//! **Append-Only Write Pattern**:
//! - The whole log is read, one record is appended in memory, the whole log
//!   is written back
//! - No update, delete or indexed access
//! - Single writer: concurrent runs can lose each other's appends
//!
//! A missing file, invalid JSON, or a top-level value that is not an array
//! loads as an empty log. The bad content is not backed up.
//!
//! Inside a valid array every element counts. Elements are decoded one by
//! one; an element that is not a record object loads as an empty record, and
//! `append` writes every existing element back exactly as it was read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use super::ExperimentRecord;
use crate::Result;

/// Indentation of the persisted JSON array.
const JSON_INDENT: &[u8] = b"    ";

/// JSON-file-backed experiment log.
#[derive(Debug, Clone)]
pub struct ExperimentLog {
    path: PathBuf,
}

impl ExperimentLog {
    /// Open the log at `path`; nothing is read until `load`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every logged record, in logged order.
    ///
    /// The result has one record per element of the persisted array.
    ///
    /// # Errors
    ///
    /// Returns error only if the file exists but cannot be read.
    /// Unparseable content is not an error.
    pub fn load(&self) -> Result<Vec<ExperimentRecord>> {
        let entries = self.load_entries()?;
        Ok(entries.into_iter().map(decode_entry).collect())
    }

    /// Overwrite the log with `records`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the file write fails.
    pub fn save(&self, records: &[ExperimentRecord]) -> Result<()> {
        self.write_json(records, records.len())
    }

    /// Load, append `record`, save. Returns the new log length.
    ///
    /// Existing elements are written back untouched, including ones that
    /// do not decode as records.
    ///
    /// # Errors
    ///
    /// Returns error if the log cannot be read or written.
    pub fn append(&self, record: ExperimentRecord) -> Result<usize> {
        let mut entries = self.load_entries()?;
        if entries
            .iter()
            .any(|e| e.get("experiment_id").and_then(Value::as_str) == Some(record.experiment_id()))
        {
            tracing::warn!(
                experiment_id = record.experiment_id(),
                "experiment ID already logged; same-second records share IDs and report files"
            );
        }
        entries.push(serde_json::to_value(&record)?);
        self.write_json(&entries, entries.len())?;
        Ok(entries.len())
    }

    /// Raw array elements; missing or malformed files read as empty.
    fn load_entries(&self) -> Result<Vec<Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no experiment log yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let entries = parse_entries(&content).unwrap_or_else(|reason| {
            tracing::warn!(
                path = %self.path.display(),
                %reason,
                "discarding unreadable experiment log"
            );
            Vec::new()
        });

        tracing::debug!(path = %self.path.display(), records = entries.len(), "loaded experiment log");
        Ok(entries)
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T, records: usize) -> Result<()> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
        value.serialize(&mut serializer)?;

        fs::write(&self.path, buf)?;
        tracing::debug!(path = %self.path.display(), records, "saved experiment log");
        Ok(())
    }
}

/// Anything but a top-level JSON array is rejected with a reason.
fn parse_entries(content: &str) -> std::result::Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(content).map_err(|e| e.to_string())? {
        Value::Array(entries) => Ok(entries),
        _ => Err("top-level JSON value is not an array".to_string()),
    }
}

fn decode_entry(entry: Value) -> ExperimentRecord {
    ExperimentRecord::deserialize(entry).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "experiment log entry is not a record; reading it as empty");
        ExperimentRecord::default()
    })
}
