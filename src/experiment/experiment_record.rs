//! Experiment Record - one lab-notebook entry

use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Prefix of every generated experiment ID.
pub const EXPERIMENT_ID_PREFIX: &str = "EXP-";

/// Creation instant of a record, captured once.
///
/// The 14-digit token (`YYYYMMDDHHMMSS`) is computed here a single time and
/// shared by the experiment ID and both report file names. Two records
/// created within the same second share a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    at: NaiveDateTime,
    token: String,
}

impl Timestamp {
    /// Capture the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// Use a fixed instant (useful for testing and replays).
    #[must_use]
    pub fn at(at: NaiveDateTime) -> Self {
        Self {
            at,
            token: at.format("%Y%m%d%H%M%S").to_string(),
        }
    }

    /// The 14-digit token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The captured instant.
    #[must_use]
    pub const fn instant(&self) -> NaiveDateTime {
        self.at
    }

    /// `EXP-<token>`
    #[must_use]
    pub fn experiment_id(&self) -> String {
        format!("{EXPERIMENT_ID_PREFIX}{}", self.token)
    }

    /// Human-readable creation date, microsecond precision.
    #[must_use]
    pub fn date(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }

    /// `experiment_report_<token>.<extension>`
    #[must_use]
    pub fn report_file_name(&self, extension: &str) -> String {
        format!("experiment_report_{}.{extension}", self.token)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Experiment Record represents one logged lab experiment.
///
/// The field order below is the field order of the persisted JSON. Every
/// field defaults when absent, `null`, or of the wrong type, so logs written
/// by older or foreign versions still load. Keys this version does not know
/// are kept and written back after the known ones.
/// ID and date are fixed at construction; there are no setters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExperimentRecord {
    #[serde(deserialize_with = "lenient")]
    title: String,
    #[serde(deserialize_with = "lenient")]
    experiment_id: String,
    #[serde(deserialize_with = "lenient")]
    date: String,
    #[serde(deserialize_with = "lenient")]
    experimenter: String,
    #[serde(deserialize_with = "lenient")]
    project: String,
    #[serde(deserialize_with = "lenient")]
    chemicals: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    equipment: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    procedure: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    observations: String,
    #[serde(deserialize_with = "lenient")]
    results: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Decode a field, falling back to its default on `null` or a type mismatch.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

impl ExperimentRecord {
    /// Create a builder whose ID and date come from `timestamp`.
    #[must_use]
    pub fn builder(timestamp: &Timestamp) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(timestamp)
    }

    /// Get the experiment title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the experiment ID (`EXP-<14 digits>`).
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the creation date.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Get the experimenter name.
    #[must_use]
    pub fn experimenter(&self) -> &str {
        &self.experimenter
    }

    /// Get the project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Chemicals in entry order, each formatted `<name> (<amount>)`.
    #[must_use]
    pub fn chemicals(&self) -> &[String] {
        &self.chemicals
    }

    /// Equipment in entry order.
    #[must_use]
    pub fn equipment(&self) -> &[String] {
        &self.equipment
    }

    /// Procedure steps in execution order.
    #[must_use]
    pub fn procedure(&self) -> &[String] {
        &self.procedure
    }

    /// Free-text observations (may be empty or span several lines).
    #[must_use]
    pub fn observations(&self) -> &str {
        &self.observations
    }

    /// Free-text results (may be empty or span several lines).
    #[must_use]
    pub fn results(&self) -> &str {
        &self.results
    }

    /// Persisted keys this version does not interpret, kept for write-back.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    record: ExperimentRecord,
}

impl ExperimentRecordBuilder {
    /// Create a new builder stamped with `timestamp`.
    #[must_use]
    pub fn new(timestamp: &Timestamp) -> Self {
        Self {
            record: ExperimentRecord {
                experiment_id: timestamp.experiment_id(),
                date: timestamp.date(),
                ..ExperimentRecord::default()
            },
        }
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    /// Set the experimenter.
    #[must_use]
    pub fn experimenter(mut self, experimenter: impl Into<String>) -> Self {
        self.record.experimenter = experimenter.into();
        self
    }

    /// Set the project.
    #[must_use]
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.record.project = project.into();
        self
    }

    /// Append a chemical with its amount, stored as `<name> (<amount>)`.
    #[must_use]
    pub fn chemical(mut self, name: &str, amount: &str) -> Self {
        self.record.chemicals.push(format_chemical(name, amount));
        self
    }

    /// Replace the chemical list with already formatted entries.
    #[must_use]
    pub fn chemicals(mut self, chemicals: Vec<String>) -> Self {
        self.record.chemicals = chemicals;
        self
    }

    /// Append one equipment item.
    #[must_use]
    pub fn equipment(mut self, item: impl Into<String>) -> Self {
        self.record.equipment.push(item.into());
        self
    }

    /// Replace the equipment list.
    #[must_use]
    pub fn equipment_list(mut self, equipment: Vec<String>) -> Self {
        self.record.equipment = equipment;
        self
    }

    /// Append one procedure step.
    #[must_use]
    pub fn procedure_step(mut self, step: impl Into<String>) -> Self {
        self.record.procedure.push(step.into());
        self
    }

    /// Replace the procedure.
    #[must_use]
    pub fn procedure(mut self, steps: Vec<String>) -> Self {
        self.record.procedure = steps;
        self
    }

    /// Set the observations text.
    #[must_use]
    pub fn observations(mut self, observations: impl Into<String>) -> Self {
        self.record.observations = observations.into();
        self
    }

    /// Set the results text.
    #[must_use]
    pub fn results(mut self, results: impl Into<String>) -> Self {
        self.record.results = results.into();
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        self.record
    }
}

/// `<name> (<amount>)`
#[must_use]
pub fn format_chemical(name: &str, amount: &str) -> String {
    format!("{name} ({amount})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_timestamp() -> Timestamp {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_micro_opt(9, 5, 1, 42))
            .unwrap();
        Timestamp::at(at)
    }

    #[test]
    fn test_timestamp_token_and_id() {
        let ts = fixed_timestamp();
        assert_eq!(ts.token(), "20240307090501");
        assert_eq!(ts.experiment_id(), "EXP-20240307090501");
        assert_eq!(ts.date(), "2024-03-07 09:05:01.000042");
        assert_eq!(
            ts.report_file_name("pdf"),
            "experiment_report_20240307090501.pdf"
        );
    }

    #[test]
    fn test_builder_stamps_id_and_date() {
        let ts = fixed_timestamp();
        let record = ExperimentRecord::builder(&ts)
            .title("Titration")
            .chemical("NaCl", "5g")
            .equipment("Burette")
            .procedure_step("Fill")
            .build();

        assert_eq!(record.experiment_id(), "EXP-20240307090501");
        assert_eq!(record.date(), "2024-03-07 09:05:01.000042");
        assert_eq!(record.chemicals(), ["NaCl (5g)"]);
        assert_eq!(record.equipment(), ["Burette"]);
        assert_eq!(record.procedure(), ["Fill"]);
        assert!(record.observations().is_empty());
    }

    #[test]
    fn test_missing_fields_default_on_load() {
        let json = r#"{"title": "Old entry", "experiment_id": "EXP-20200101000000"}"#;
        let record: ExperimentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title(), "Old entry");
        assert!(record.chemicals().is_empty());
        assert!(record.equipment().is_empty());
        assert!(record.procedure().is_empty());
        assert_eq!(record.results(), "");
    }

    #[test]
    fn test_null_and_mistyped_fields_default() {
        let json = r#"{"title": "Old", "observations": null, "results": 42,
                       "chemicals": "NaCl", "procedure": ["Mix", 3]}"#;
        let record: ExperimentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title(), "Old");
        assert_eq!(record.observations(), "");
        assert_eq!(record.results(), "");
        assert!(record.chemicals().is_empty());
        assert!(record.procedure().is_empty());
    }

    #[test]
    fn test_unknown_keys_written_back() {
        let json = r#"{"title": "Tagged", "lab": "B2", "temperature_c": 21.5}"#;
        let record: ExperimentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.extra().get("lab"), Some(&Value::from("B2")));

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["lab"], "B2");
        assert_eq!(written["temperature_c"], 21.5);
        assert_eq!(written["title"], "Tagged");
    }

    #[test]
    fn test_serialized_field_order() {
        let record = ExperimentRecord::builder(&fixed_timestamp()).build();
        let json = serde_json::to_string(&record).unwrap();

        let keys = [
            "\"title\"",
            "\"experiment_id\"",
            "\"date\"",
            "\"experimenter\"",
            "\"project\"",
            "\"chemicals\"",
            "\"equipment\"",
            "\"procedure\"",
            "\"observations\"",
            "\"results\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
