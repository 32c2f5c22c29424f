//! Interactive lab notebook.
//!
//! Prompts for one experiment, logs it to `experiment_log.json` and writes
//! `experiment_report_<timestamp>.pdf` / `.docx` to the working directory.
//! Diagnostics go to stderr; set `RUST_LOG=debug` for more.

use std::io;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lab_notebook::config::NotebookConfig;
use lab_notebook::experiment::InputCollector;
use lab_notebook::Notebook;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let notebook = Notebook::new(NotebookConfig::default());
    let stdin = io::stdin();

    let (record, timestamp) = InputCollector::new(stdin.lock(), io::stdout())
        .collect()
        .context("failed to read experiment details")?;

    notebook
        .append(&record)
        .context("failed to update experiment log")?;
    println!("\nExperiment logged successfully! Generating reports...");

    let pdf = notebook
        .render_pdf(&record, &timestamp)
        .context("failed to generate PDF report")?;
    println!("PDF report generated: {}", pdf.display());

    let docx = notebook
        .render_docx(&record, &timestamp)
        .context("failed to generate Word report")?;
    println!("Word report generated: {}", docx.display());

    Ok(())
}
