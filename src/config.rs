//! Notebook configuration
//!
//! Paths are plain values handed to the log store and the report writers;
//! nothing here is process-wide state.

use std::path::{Path, PathBuf};

/// Default experiment log file, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "experiment_log.json";

/// Where the notebook reads/writes its log and drops its reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookConfig {
    log_path: PathBuf,
    output_dir: PathBuf,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            output_dir: PathBuf::from("."),
        }
    }
}

impl NotebookConfig {
    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> NotebookConfigBuilder {
        NotebookConfigBuilder::default()
    }

    /// Path of the JSON experiment log.
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Directory the PDF and Word reports are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Builder for `NotebookConfig`.
#[derive(Debug, Default)]
pub struct NotebookConfigBuilder {
    config: NotebookConfig,
}

impl NotebookConfigBuilder {
    /// Set the experiment log path.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the report output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> NotebookConfig {
        self.config
    }
}
