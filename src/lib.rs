//! # Lab Notebook: Experiment Log and Reports
//!
//! Lab Notebook records chemistry experiments. Each run prompts for one
//! experiment, appends it to a JSON log, and renders it as a PDF page and a
//! Word document.
//!
//! ## Design Principles
//!
//! - **Append-only log**: read full, append one, write full
//! - **Forgiving loads**: a missing or malformed log reads as empty
//! - **One layout, two formats**: sections are decided once, then drawn by
//!   each format writer
//! - **Log before render**: a failed report never loses the record
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lab_notebook::config::NotebookConfig;
//! use lab_notebook::experiment::{ExperimentRecord, Timestamp};
//! use lab_notebook::Notebook;
//!
//! let notebook = Notebook::new(NotebookConfig::default());
//!
//! let timestamp = Timestamp::now();
//! let record = ExperimentRecord::builder(&timestamp)
//!     .title("Synthesis A")
//!     .experimenter("Jane")
//!     .chemical("NaCl", "5g")
//!     .procedure_step("Mix")
//!     .build();
//!
//! let logged = notebook.log_record(record, timestamp)?;
//! println!("PDF: {}", logged.pdf_path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod experiment;
pub mod notebook;
pub mod report;

pub use error::{Error, Result};
pub use notebook::{LoggedExperiment, Notebook};
