// Catalog and question-bank invariants. Native-friendly, no browser APIs.

use std::collections::HashSet;

use kanji_karuta::{GRADE_SETS, LoadError, RoundSize, SetChoice, bank::parse_bank};

#[test]
fn grade_set_keys_files_and_labels_are_unique() {
    let mut keys = HashSet::new();
    let mut files = HashSet::new();
    let mut labels = HashSet::new();
    for g in GRADE_SETS {
        assert!(keys.insert(g.key), "duplicate key '{}'", g.key);
        assert!(files.insert(g.file), "duplicate file '{}'", g.file);
        assert!(labels.insert(g.label), "duplicate label '{}'", g.label);
        assert!(g.file.ends_with(".json"), "'{}' is not a json file", g.file);
    }
    assert_eq!(GRADE_SETS.len(), 11);
}

#[test]
fn every_catalog_key_resolves_to_its_file() {
    for g in GRADE_SETS {
        let choice = SetChoice::from_key(g.key).unwrap();
        assert_eq!(choice.file, g.file);
        assert_eq!(choice.label, g.label);
    }
}

#[test]
fn round_sizes_round_trip_through_counts() {
    for size in RoundSize::ALL {
        assert_eq!(RoundSize::from_count(size.count()), Some(size));
    }
    assert_eq!(RoundSize::from_count(7), None);
}

#[test]
fn empty_bank_is_a_load_failure_not_an_empty_round() {
    let err = parse_bank("0601.json", "[]").unwrap_err();
    assert!(matches!(err, LoadError::Empty { .. }));
    assert!(err.to_string().contains("問題が空です"));
}

#[test]
fn non_json_payload_is_reported_with_the_file_name() {
    let err = parse_bank("0301.json", "<html>404</html>").unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("0301.json"));
}
