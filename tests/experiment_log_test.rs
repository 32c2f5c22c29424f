//! Experiment Log Tests
//!
//! Loading is forgiving (missing or malformed logs read as empty), every
//! element of a valid array survives an append, and saving followed by
//! loading gives back the same records.

use std::fs;

use lab_notebook::experiment::{ExperimentLog, ExperimentRecord, Timestamp};

fn sample(title: &str) -> ExperimentRecord {
    ExperimentRecord::builder(&Timestamp::now())
        .title(title)
        .experimenter("Jane")
        .project("P1")
        .chemical("NaCl", "5g")
        .chemical("H2O", "100ml")
        .equipment("Beaker")
        .procedure_step("Mix")
        .procedure_step("Heat")
        .observations("clear solution\nno precipitate")
        .results("yield 90%")
        .build()
}

// =============================================================================
// load
// =============================================================================

#[test]
fn test_load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = ExperimentLog::new(dir.path().join("absent.json"));

    assert!(log.load().unwrap().is_empty());
}

#[test]
fn test_load_invalid_json_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    fs::write(&path, "not json").unwrap();

    assert!(ExperimentLog::new(&path).load().unwrap().is_empty());
}

#[test]
fn test_load_json_object_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    fs::write(&path, r#"{"title": "not a list"}"#).unwrap();

    assert!(ExperimentLog::new(&path).load().unwrap().is_empty());
}

#[test]
fn test_load_malformed_file_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    fs::write(&path, "{broken").unwrap();

    let _ = ExperimentLog::new(&path).load().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{broken");
}

#[test]
fn test_load_valid_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    fs::write(
        &path,
        r#"[
            {"title": "A", "experiment_id": "EXP-20240101000000", "date": "2024-01-01 00:00:00",
             "experimenter": "Jane", "project": "P1", "chemicals": ["NaCl (5g)"],
             "equipment": [], "procedure": ["Mix", "Heat"], "observations": "", "results": "ok"},
            {"title": "B", "experiment_id": "EXP-20240102000000"}
        ]"#,
    )
    .unwrap();

    let records = ExperimentLog::new(&path).load().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title(), "A");
    assert_eq!(records[0].chemicals(), ["NaCl (5g)"]);
    assert_eq!(records[0].procedure(), ["Mix", "Heat"]);
    assert_eq!(records[0].results(), "ok");
    assert_eq!(records[1].experiment_id(), "EXP-20240102000000");
    assert!(records[1].procedure().is_empty());
}

#[test]
fn test_load_keeps_length_with_null_and_non_object_elements() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    fs::write(
        &path,
        r#"[
            {"title": "Old A", "experiment_id": "EXP-20230101000000", "observations": null},
            {"title": "Old B", "experiment_id": "EXP-20230102000000", "results": 12},
            [1, 2]
        ]"#,
    )
    .unwrap();

    let records = ExperimentLog::new(&path).load().unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].title(), "Old A");
    assert_eq!(records[0].observations(), "");
    assert_eq!(records[1].title(), "Old B");
    assert_eq!(records[1].results(), "");
    assert_eq!(records[2], ExperimentRecord::default());
}

// =============================================================================
// save / append
// =============================================================================

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let log = ExperimentLog::new(dir.path().join("log.json"));
    let records = vec![sample("First"), sample("Second")];

    log.save(&records).unwrap();

    assert_eq!(log.load().unwrap(), records);
}

#[test]
fn test_append_replaces_malformed_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    fs::write(&path, "garbage").unwrap();
    let log = ExperimentLog::new(&path);

    assert_eq!(log.append(sample("Fresh")).unwrap(), 1);
    assert_eq!(log.load().unwrap()[0].title(), "Fresh");
}

#[test]
fn test_append_preserves_earlier_entries_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    let earlier = serde_json::json!([
        {"title": "Old A", "experiment_id": "EXP-20230101000000", "observations": null},
        {"title": "Old B", "experiment_id": "EXP-20230102000000", "results": 12},
        [1, 2]
    ]);
    fs::write(&path, serde_json::to_string(&earlier).unwrap()).unwrap();
    let log = ExperimentLog::new(&path);

    assert_eq!(log.append(sample("New")).unwrap(), 4);

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let written = written.as_array().unwrap();
    assert_eq!(written.len(), 4);
    assert_eq!(written[..3], earlier.as_array().unwrap()[..]);
    assert_eq!(written[3]["title"], "New");
}

#[test]
fn test_append_keeps_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.json");
    fs::write(
        &path,
        r#"[{"title": "Tagged", "experiment_id": "EXP-20230101000000", "lab": "B2"}]"#,
    )
    .unwrap();
    let log = ExperimentLog::new(&path);

    log.append(sample("Next")).unwrap();

    let records = log.load().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].extra().get("lab"),
        Some(&serde_json::Value::from("B2"))
    );
    assert!(fs::read_to_string(&path).unwrap().contains("\"lab\": \"B2\""));
}

#[test]
fn test_appended_record_keeps_field_order() {
    let dir = tempfile::tempdir().unwrap();
    let log = ExperimentLog::new(dir.path().join("log.json"));

    log.append(sample("Ordered")).unwrap();

    let content = fs::read_to_string(log.path()).unwrap();
    let title = content.find("\"title\"").unwrap();
    let id = content.find("\"experiment_id\"").unwrap();
    let results = content.find("\"results\"").unwrap();
    assert!(title < id && id < results);
}

#[test]
fn test_save_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let log = ExperimentLog::new(dir.path().join("no").join("log.json"));

    assert!(log.save(&[sample("X")]).is_err());
}

// =============================================================================
// Round-trip law
// =============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_record() -> impl Strategy<Value = ExperimentRecord> {
        let text = ".{0,24}";
        let list = prop::collection::vec(".{0,16}", 0..5);
        (
            (text, text, text, text, text),
            (list.clone(), list.clone(), list),
            (text, text),
        )
            .prop_map(
                |(
                    (title, experiment_id, date, experimenter, project),
                    (chemicals, equipment, procedure),
                    (observations, results),
                )| {
                    serde_json::from_value(serde_json::json!({
                        "title": title,
                        "experiment_id": experiment_id,
                        "date": date,
                        "experimenter": experimenter,
                        "project": project,
                        "chemicals": chemicals,
                        "equipment": equipment,
                        "procedure": procedure,
                        "observations": observations,
                        "results": results,
                    }))
                    .unwrap()
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: save(load(save(R, p)), p2); load(p2) == R
        #[test]
        fn prop_save_load_round_trip(records in prop::collection::vec(arb_record(), 0..6)) {
            let dir = tempfile::tempdir().unwrap();
            let first = ExperimentLog::new(dir.path().join("p.json"));
            let second = ExperimentLog::new(dir.path().join("p2.json"));

            first.save(&records).unwrap();
            second.save(&first.load().unwrap()).unwrap();

            prop_assert_eq!(second.load().unwrap(), records);
        }
    }
}
