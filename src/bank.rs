//! Question banks: the grade/set catalog and JSON parsing.
//!
//! A bank file is a JSON array of `{ "kanji": "水", "reading": "みず" }` objects.
//! Fetching lives in `web::fetch`; everything here is host independent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub kanji: String,
    pub reading: String,
}

impl Question {
    pub fn new(kanji: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            kanji: kanji.into(),
            reading: reading.into(),
        }
    }
}

/// One selectable entry of the grade/set menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradeSet {
    pub key: &'static str,
    pub file: &'static str,
    pub label: &'static str,
}

pub const GRADE_SETS: &[GradeSet] = &[
    GradeSet {
        key: "1nen",
        file: "01.json",
        label: "1年生",
    },
    GradeSet {
        key: "2nen_1",
        file: "0201.json",
        label: "2年生 セット1",
    },
    GradeSet {
        key: "2nen_2",
        file: "0202.json",
        label: "2年生 セット2",
    },
    GradeSet {
        key: "3nen_1",
        file: "0301.json",
        label: "3年生 セット1",
    },
    GradeSet {
        key: "3nen_2",
        file: "0302.json",
        label: "3年生 セット2",
    },
    GradeSet {
        key: "4nen_1",
        file: "0401.json",
        label: "4年生 セット1",
    },
    GradeSet {
        key: "4nen_2",
        file: "0402.json",
        label: "4年生 セット2",
    },
    GradeSet {
        key: "5nen_1",
        file: "0501.json",
        label: "5年生 セット1",
    },
    GradeSet {
        key: "5nen_2",
        file: "0502.json",
        label: "5年生 セット2",
    },
    GradeSet {
        key: "6nen_1",
        file: "0601.json",
        label: "6年生 セット1",
    },
    GradeSet {
        key: "6nen_2",
        file: "0602.json",
        label: "6年生 セット2",
    },
];

/// Resolved menu choice. Keys missing from the catalog still load, from
/// `<key>.json`, and use the key itself as label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetChoice {
    pub key: String,
    pub file: String,
    pub label: String,
}

impl SetChoice {
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let choice = match GRADE_SETS.iter().find(|g| g.key == key) {
            Some(g) => Self {
                key: g.key.to_string(),
                file: g.file.to_string(),
                label: g.label.to_string(),
            },
            None => Self {
                key: key.to_string(),
                file: format!("{key}.json"),
                label: key.to_string(),
            },
        };
        Some(choice)
    }
}

/// What the player picked on the menu. The labels are the option texts the
/// player saw; history records those, not the catalog defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub set: SetChoice,
    pub size: RoundSize,
    pub mode_label: String,
}

impl Selection {
    pub fn new(set: SetChoice, size: RoundSize) -> Self {
        Self {
            set,
            size,
            mode_label: size.label().to_string(),
        }
    }

    /// Prefer the menu's option texts; blank or missing texts keep the
    /// catalog labels.
    pub fn with_menu_text(mut self, set_text: Option<&str>, mode_text: Option<&str>) -> Self {
        if let Some(text) = set_text.map(str::trim).filter(|t| !t.is_empty()) {
            self.set.label = text.to_string();
        }
        if let Some(text) = mode_text.map(str::trim).filter(|t| !t.is_empty()) {
            self.mode_label = text.to_string();
        }
        self
    }
}

/// Number of cards in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundSize {
    Five,
    Ten,
    Fifteen,
}

impl RoundSize {
    pub const ALL: [RoundSize; 3] = [RoundSize::Five, RoundSize::Ten, RoundSize::Fifteen];

    pub fn count(self) -> usize {
        match self {
            RoundSize::Five => 5,
            RoundSize::Ten => 10,
            RoundSize::Fifteen => 15,
        }
    }

    pub fn from_count(n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.count() == n)
    }

    pub fn label(self) -> &'static str {
        match self {
            RoundSize::Five => "5まい",
            RoundSize::Ten => "10まい",
            RoundSize::Fifteen => "15まい",
        }
    }
}

/// Parse a bank payload. `file` is only used to label errors.
pub fn parse_bank(file: &str, payload: &str) -> Result<Vec<Question>, LoadError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| LoadError::Parse {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => {
            return Err(LoadError::NotAList {
                file: file.to_string(),
            });
        }
    };
    if items.is_empty() {
        return Err(LoadError::Empty {
            file: file.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut bank = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let bad = |reason: String| LoadError::BadEntry {
            file: file.to_string(),
            index,
            reason,
        };
        let q: Question = serde_json::from_value(item).map_err(|e| bad(e.to_string()))?;
        if q.kanji.trim().is_empty() || q.reading.trim().is_empty() {
            return Err(bad("kanji / reading が空です".to_string()));
        }
        if !seen.insert(q.kanji.clone()) {
            log::warn!("{file}: duplicate kanji {} dropped", q.kanji);
            continue;
        }
        bank.push(q);
    }
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let bank = parse_bank(
            "01.json",
            r#"[{"kanji":"水","reading":"みず"},{"kanji":"火","reading":"ひ"}]"#,
        )
        .unwrap();
        assert_eq!(bank, vec![Question::new("水", "みず"), Question::new("火", "ひ")]);
    }

    #[test]
    fn empty_array_is_a_failure() {
        assert_eq!(
            parse_bank("01.json", "[]"),
            Err(LoadError::Empty {
                file: "01.json".into()
            })
        );
    }

    #[test]
    fn object_payload_is_not_a_list() {
        assert!(matches!(
            parse_bank("x.json", r#"{"kanji":"水"}"#),
            Err(LoadError::NotAList { .. })
        ));
    }

    #[test]
    fn malformed_entry_reports_index() {
        let err = parse_bank("x.json", r#"[{"kanji":"水","reading":"みず"},{"kanji":"火"}]"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::BadEntry { index: 1, .. }));
    }

    #[test]
    fn duplicate_kanji_keep_first() {
        let bank = parse_bank(
            "x.json",
            r#"[{"kanji":"生","reading":"せい"},{"kanji":"生","reading":"なま"}]"#,
        )
        .unwrap();
        assert_eq!(bank, vec![Question::new("生", "せい")]);
    }

    #[test]
    fn unknown_key_falls_back_to_filename() {
        let c = SetChoice::from_key("extra").unwrap();
        assert_eq!(c.file, "extra.json");
        assert_eq!(SetChoice::from_key("2nen_1").unwrap().file, "0201.json");
        assert!(SetChoice::from_key("  ").is_none());
    }

    #[test]
    fn menu_text_overrides_catalog_labels() {
        let set = SetChoice::from_key("extra").unwrap();
        let sel = Selection::new(set.clone(), RoundSize::Ten)
            .with_menu_text(Some(" 特別セット "), Some("10まい (ふつう)"));
        assert_eq!(sel.set.label, "特別セット");
        assert_eq!(sel.mode_label, "10まい (ふつう)");
        assert_eq!(sel.set.file, "extra.json");

        let fallback = Selection::new(set, RoundSize::Ten).with_menu_text(None, Some("  "));
        assert_eq!(fallback.set.label, "extra");
        assert_eq!(fallback.mode_label, "10まい");
    }
}
