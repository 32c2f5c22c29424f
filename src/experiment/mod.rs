//! Experiment Logging
//!
//! This module provides the lab-notebook record, the prompt-driven
//! collector that fills it, and the append-only JSON log that keeps it.
//!
//! ## Lifecycle
//!
//! ```text
//! InputCollector ──> ExperimentRecord ──> ExperimentLog (append once)
//!                          │
//!                          └──> report writers (PDF, Word)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lab_notebook::experiment::{ExperimentRecord, Timestamp};
//!
//! let timestamp = Timestamp::now();
//! let record = ExperimentRecord::builder(&timestamp)
//!     .title("Synthesis A")
//!     .chemical("NaCl", "5g")
//!     .procedure_step("Mix")
//!     .build();
//!
//! assert!(record.experiment_id().starts_with("EXP-"));
//! assert_eq!(record.chemicals(), ["NaCl (5g)"]);
//! ```

mod collector;
mod experiment_record;
mod log_store;

pub use collector::InputCollector;
pub use experiment_record::{
    format_chemical, ExperimentRecord, ExperimentRecordBuilder, Timestamp, EXPERIMENT_ID_PREFIX,
};
pub use log_store::ExperimentLog;
