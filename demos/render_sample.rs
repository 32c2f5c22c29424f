//! Render Sample Example
//!
//! Logs a scripted experiment into a scratch directory and renders both
//! reports, without any prompting.
//!
//! Run with: cargo run --example render_sample

use lab_notebook::config::NotebookConfig;
use lab_notebook::experiment::{ExperimentRecord, Timestamp};
use lab_notebook::Notebook;

fn main() -> anyhow::Result<()> {
    println!("=== Lab Notebook Sample Report ===\n");

    let dir = std::env::temp_dir().join("lab-notebook-sample");
    std::fs::create_dir_all(&dir)?;

    let notebook = Notebook::new(
        NotebookConfig::builder()
            .log_path(dir.join("experiment_log.json"))
            .output_dir(&dir)
            .build(),
    );

    let timestamp = Timestamp::now();
    let record = ExperimentRecord::builder(&timestamp)
        .title("Recrystallisation of benzoic acid")
        .experimenter("Jane")
        .project("Purification")
        .chemical("Benzoic acid (crude)", "2.0g")
        .chemical("Water", "40ml")
        .equipment("Erlenmeyer flask")
        .equipment("Hot plate")
        .equipment("Buchner funnel")
        .procedure_step("Dissolve the crude acid in boiling water")
        .procedure_step("Cool slowly to room temperature, then in ice")
        .procedure_step("Collect crystals by vacuum filtration")
        .observations("Colourless needles formed on cooling.\nMother liquor slightly yellow.")
        .results("Recovered 1.6g (80%)")
        .build();

    println!("Experiment ID: {}", record.experiment_id());
    let logged = notebook.log_record(record, timestamp)?;

    println!("Log entries:   {}", logged.log_len);
    println!("PDF report:    {}", logged.pdf_path.display());
    println!("Word report:   {}", logged.docx_path.display());

    Ok(())
}
