//! Input Collector - builds an experiment record from sequential prompts
//!
//! Prompts go to any `Write` and answers come from any `BufRead`, so the
//! same code drives the terminal and the tests. No answer is validated:
//! an empty line is a valid value for every single-line field and is the
//! terminator for every list loop. End of input reads as an empty line.

use std::io::{BufRead, Write};

use super::experiment_record::{format_chemical, ExperimentRecord, Timestamp};
use crate::Result;

const CHEMICAL_PROMPT: &str = "Enter chemical (or press Enter to finish): ";
const EQUIPMENT_PROMPT: &str = "Enter equipment (or press Enter to finish): ";
const PROCEDURE_PROMPT: &str = "Enter procedure step (or press Enter to finish): ";

/// Prompt-driven collector over an input/output pair.
pub struct InputCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InputCollector<R, W> {
    /// Wrap an input source and a prompt sink.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collect a record stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns error if the prompt sink or the input source fails.
    pub fn collect(&mut self) -> Result<(ExperimentRecord, Timestamp)> {
        self.collect_at(Timestamp::now())
    }

    /// Collect a record stamped with `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns error if the prompt sink or the input source fails.
    pub fn collect_at(&mut self, timestamp: Timestamp) -> Result<(ExperimentRecord, Timestamp)> {
        let title = self.prompt("Experiment Title: ")?;
        let experimenter = self.prompt("Experimenter Name: ")?;
        let project = self.prompt("Project Name: ")?;
        let chemicals = self.prompt_chemicals()?;
        let equipment = self.prompt_list(EQUIPMENT_PROMPT)?;
        let procedure = self.prompt_list(PROCEDURE_PROMPT)?;
        let observations = self.prompt("Observations: ")?;
        let results = self.prompt("Results: ")?;

        let record = ExperimentRecord::builder(&timestamp)
            .title(title)
            .experimenter(experimenter)
            .project(project)
            .chemicals(chemicals)
            .equipment_list(equipment)
            .procedure(procedure)
            .observations(observations)
            .results(results)
            .build();

        tracing::debug!(
            experiment_id = record.experiment_id(),
            chemicals = record.chemicals().len(),
            equipment = record.equipment().len(),
            steps = record.procedure().len(),
            "collected experiment"
        );

        Ok((record, timestamp))
    }

    /// Items until an empty answer, each followed by an amount prompt.
    fn prompt_chemicals(&mut self) -> Result<Vec<String>> {
        let mut chemicals = Vec::new();
        loop {
            let name = self.prompt(CHEMICAL_PROMPT)?;
            if name.is_empty() {
                return Ok(chemicals);
            }
            let amount = self.prompt(&format!("Amount of {name} used: "))?;
            chemicals.push(format_chemical(&name, &amount));
        }
    }

    /// Items until an empty answer.
    fn prompt_list(&mut self, prompt: &str) -> Result<Vec<String>> {
        let mut items = Vec::new();
        loop {
            let item = self.prompt(prompt)?;
            if item.is_empty() {
                return Ok(items);
            }
            items.push(item);
        }
    }

    fn prompt(&mut self, prompt: &str) -> Result<String> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        // Only the line terminator is stripped; surrounding spaces are kept.
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}
