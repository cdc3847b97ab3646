//! Voice resolution against whatever the host speech engine has installed.
//!
//! The host may report its voices late and more than once, so `resolve` is
//! meant to be called on every report and is idempotent.

use serde::{Deserialize, Serialize};

/// How many candidates the voice picker offers.
pub const MAX_CANDIDATES: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    /// "Kyoko (ja-JP)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.lang)
    }
}

#[derive(Clone, Debug, Default)]
pub struct VoiceResolver {
    installed: Vec<Voice>,
    candidates: Vec<Voice>,
    active: Option<String>,
    manual: bool,
}

impl VoiceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the host's current voice list. Returns true when the candidate list
    /// or the active voice changed.
    pub fn resolve(&mut self, voices: Vec<Voice>) -> bool {
        let candidates = rank(&voices);
        let previous = (self.candidates.clone(), self.active.clone());
        self.installed = voices;
        self.candidates = candidates;

        let keep_manual = self.manual
            && self
                .active
                .as_deref()
                .is_some_and(|name| self.installed.iter().any(|v| v.name == name));
        if !keep_manual {
            self.manual = false;
            self.active = self.candidates.first().map(|v| v.name.clone());
        }
        previous != (self.candidates.clone(), self.active.clone())
    }

    /// Manual override by name; any installed voice is accepted.
    pub fn select(&mut self, name: &str) -> bool {
        if self.installed.iter().any(|v| v.name == name) {
            self.active = Some(name.to_string());
            self.manual = true;
            true
        } else {
            false
        }
    }

    pub fn candidates(&self) -> &[Voice] {
        &self.candidates
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Look the active voice up by name in the latest host list.
    pub fn active(&self) -> Option<&Voice> {
        let name = self.active.as_deref()?;
        self.installed.iter().find(|v| v.name == name)
    }

    pub fn has_voice(&self) -> bool {
        self.active().is_some()
    }

    pub fn installed_count(&self) -> usize {
        self.installed.len()
    }
}

/// Up to three `ja-JP` voices, else other Japanese voices, else anything.
fn rank(voices: &[Voice]) -> Vec<Voice> {
    let pick = |pred: &dyn Fn(&str) -> bool| -> Vec<Voice> {
        voices
            .iter()
            .filter(|v| pred(&v.lang.to_ascii_lowercase()))
            .take(MAX_CANDIDATES)
            .cloned()
            .collect()
    };

    let ja_jp = pick(&|lang: &str| lang.contains("ja-jp"));
    if !ja_jp.is_empty() {
        return ja_jp;
    }
    let ja = pick(&|lang: &str| lang.contains("ja"));
    if !ja.is_empty() {
        return ja;
    }
    pick(&|_: &str| true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> Vec<Voice> {
        vec![
            Voice::new("Samantha", "en-US"),
            Voice::new("Kyoko", "ja-JP"),
            Voice::new("Otoya", "JA-jp"),
            Voice::new("Hattori", "ja_JP"),
            Voice::new("O-ren", "ja-JP"),
            Voice::new("Sora", "ja-JP"),
        ]
    }

    #[test]
    fn prefers_ja_jp_and_caps_at_three() {
        let mut r = VoiceResolver::new();
        assert!(r.resolve(host()));
        let names: Vec<_> = r.candidates().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Kyoko", "Otoya", "O-ren"]);
        assert_eq!(r.active_name(), Some("Kyoko"));
    }

    #[test]
    fn falls_back_to_ja_then_any() {
        let mut r = VoiceResolver::new();
        r.resolve(vec![Voice::new("en", "en-GB"), Voice::new("Hattori", "ja_JP")]);
        assert_eq!(r.active_name(), Some("Hattori"));
        assert_eq!(r.candidates().len(), 1);

        r.resolve(vec![Voice::new("Daniel", "en-GB")]);
        assert_eq!(r.active_name(), Some("Daniel"));
    }

    #[test]
    fn no_voices_disables_speech() {
        let mut r = VoiceResolver::new();
        assert!(!r.resolve(Vec::new()));
        assert!(r.candidates().is_empty());
        assert!(!r.has_voice());
    }

    #[test]
    fn re_resolution_is_idempotent_and_keeps_manual_choice() {
        let mut r = VoiceResolver::new();
        r.resolve(host());
        assert!(!r.resolve(host()));
        assert!(r.select("Samantha"));
        assert!(!r.resolve(host()));
        assert_eq!(r.active_name(), Some("Samantha"));

        // manual choice uninstalled -> back to default
        r.resolve(vec![Voice::new("Kyoko", "ja-JP")]);
        assert_eq!(r.active_name(), Some("Kyoko"));
    }

    #[test]
    fn select_unknown_voice_is_rejected() {
        let mut r = VoiceResolver::new();
        r.resolve(host());
        assert!(!r.select("Nobody"));
        assert_eq!(r.active_name(), Some("Kyoko"));
    }
}
