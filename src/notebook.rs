//! Notebook orchestration: collect, log, render
//!
//! Steps run in a fixed order and the first failure stops the run. The log
//! is saved before any report is rendered, so a rendering failure never
//! loses the record.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::NotebookConfig;
use crate::experiment::{ExperimentLog, ExperimentRecord, InputCollector, Timestamp};
use crate::report::{render, DocxReportWriter, PdfReportWriter};
use crate::Result;

/// Outcome of one logged experiment.
#[derive(Debug, Clone)]
pub struct LoggedExperiment {
    /// The record as logged
    pub record: ExperimentRecord,
    /// Token shared by the experiment ID and the report names
    pub timestamp: Timestamp,
    /// Number of records in the log after the append
    pub log_len: usize,
    /// Path of the PDF report
    pub pdf_path: PathBuf,
    /// Path of the Word report
    pub docx_path: PathBuf,
}

/// Lab notebook bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Notebook {
    config: NotebookConfig,
}

impl Notebook {
    /// Create a notebook.
    #[must_use]
    pub const fn new(config: NotebookConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &NotebookConfig {
        &self.config
    }

    /// The experiment log this notebook appends to.
    #[must_use]
    pub fn log(&self) -> ExperimentLog {
        ExperimentLog::new(self.config.log_path())
    }

    /// Prompt for one experiment on `output`, reading answers from `input`,
    /// then log it and render both reports.
    ///
    /// # Errors
    ///
    /// Returns error if prompting, saving the log, or either render fails.
    pub fn log_experiment<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<LoggedExperiment> {
        let (record, timestamp) = InputCollector::new(input, output).collect()?;
        self.log_record(record, timestamp)
    }

    /// Log an already collected record and render both reports.
    ///
    /// # Errors
    ///
    /// Returns error if saving the log or either render fails.
    pub fn log_record(
        &self,
        record: ExperimentRecord,
        timestamp: Timestamp,
    ) -> Result<LoggedExperiment> {
        let log_len = self.append(&record)?;
        let pdf_path = self.render_pdf(&record, &timestamp)?;
        let docx_path = self.render_docx(&record, &timestamp)?;

        Ok(LoggedExperiment {
            record,
            timestamp,
            log_len,
            pdf_path,
            docx_path,
        })
    }

    /// Append `record` to the log. Returns the new log length.
    ///
    /// # Errors
    ///
    /// Returns error if the log cannot be read or written.
    pub fn append(&self, record: &ExperimentRecord) -> Result<usize> {
        let log_len = self.log().append(record.clone())?;
        tracing::info!(
            experiment_id = record.experiment_id(),
            log_len,
            "experiment logged"
        );
        Ok(log_len)
    }

    /// Write the PDF report for `record` into the output directory.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or the file write fails.
    pub fn render_pdf(&self, record: &ExperimentRecord, timestamp: &Timestamp) -> Result<PathBuf> {
        render(&PdfReportWriter::new(), record, timestamp, self.config.output_dir())
    }

    /// Write the Word report for `record` into the output directory.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or the file write fails.
    pub fn render_docx(&self, record: &ExperimentRecord, timestamp: &Timestamp) -> Result<PathBuf> {
        render(&DocxReportWriter::new(), record, timestamp, self.config.output_dir())
    }
}
