//! Runtime configuration.
//!
//! The few policies that differed between deployments of the game (whether a
//! Japanese voice is mandatory, how the card grid is laid out) are fields here
//! instead of separate builds. Every field has a default so a partial JSON
//! object is enough.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How rows/columns are derived from the round size. Cards always come in
/// lines of five.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLayoutPolicy {
    /// N/5 rows of five cards (5 → 1 row, 10 → 2, 15 → 3).
    #[default]
    Rows,
    /// N/5 columns of five cards.
    Columns,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub data_dir: String,
    pub sounds_dir: String,
    pub storage_key: String,
    pub history_cap: usize,
    /// Refuse to start a round when no voice is installed.
    pub require_voice: bool,
    pub grid_layout: GridLayoutPolicy,
    /// Delay between a correct click and the card disappearing.
    pub feedback_ms: u32,
    pub speech_rate: f32,
    pub voice_poll_ms: u32,
    pub voice_poll_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            sounds_dir: "sounds".to_string(),
            storage_key: "kanjiKarutaHistory".to_string(),
            history_cap: 10,
            require_voice: false,
            grid_layout: GridLayoutPolicy::Rows,
            feedback_ms: 350,
            speech_rate: 1.0,
            voice_poll_ms: 250,
            voice_poll_limit: 20,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_cap == 0 {
            return Err(ConfigError::Invalid("history_cap must be at least 1"));
        }
        if !(self.speech_rate > 0.0 && self.speech_rate <= 10.0) {
            return Err(ConfigError::Invalid("speech_rate must be in (0, 10]"));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty"));
        }
        Ok(())
    }

    pub fn bank_url(&self, file: &str) -> String {
        join_path(&self.data_dir, file)
    }

    pub fn sound_url(&self, name: &str) -> String {
        join_path(&self.sounds_dir, &format!("{name}.mp3"))
    }
}

fn join_path(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Cue;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"require_voice": true, "grid_layout": "columns"}"#)
            .unwrap();
        assert!(cfg.require_voice);
        assert_eq!(cfg.grid_layout, GridLayoutPolicy::Columns);
        assert_eq!(cfg.history_cap, 10);
        assert_eq!(cfg.feedback_ms, 350);
    }

    #[test]
    fn rejects_zero_history_cap() {
        assert!(GameConfig::from_json(r#"{"history_cap": 0}"#).is_err());
    }

    #[test]
    fn urls_join_directories() {
        let cfg = GameConfig {
            data_dir: "assets/data/".into(),
            ..GameConfig::default()
        };
        assert_eq!(cfg.bank_url("01.json"), "assets/data/01.json");
        assert_eq!(cfg.sound_url("bu"), "sounds/bu.mp3");
    }

    #[test]
    fn empty_sounds_dir_gives_bare_file_names() {
        let cfg = GameConfig {
            sounds_dir: String::new(),
            ..GameConfig::default()
        };
        assert_eq!(cfg.sound_url(Cue::Correct.name()), "pinpon.mp3");
    }
}
