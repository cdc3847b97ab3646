//! Game loop controller.
//!
//! Owns the session plus every host collaborator (speech, sound effects,
//! history storage) behind traits, so the browser layer only forwards events
//! and renders what comes back.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bank::{Question, RoundSize, Selection, SetChoice};
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::history::{HistoryRecord, HistoryStore, Storage};
use crate::messages;
use crate::session::{Advance, ClickOutcome, Phase, RetireToken, Session};
use crate::speech::{SpeechEngine, SpeechTrigger};
use crate::timer::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Incorrect,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Correct => "pinpon",
            Cue::Incorrect => "bu",
        }
    }
}

/// Fire-and-forget feedback sounds.
pub trait SoundEffects {
    fn play(&self, cue: Cue);
}

/// Result of checking the menu before a bank is fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preflight {
    Blocked(&'static str),
    Ready {
        selection: Selection,
        notice: Option<&'static str>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub elapsed_ms: u64,
    pub time_text: String,
    pub history: Vec<HistoryRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Ignored,
    Next,
    Finished(RoundResult),
}

/// Which game-screen buttons are enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub repeat: bool,
    pub retry: bool,
}

pub struct Controller<E: SpeechEngine, A: SoundEffects, S: Storage> {
    config: GameConfig,
    session: Session,
    speech: SpeechTrigger<E>,
    sfx: A,
    history: HistoryStore<S>,
    rng: StdRng,
}

impl<E: SpeechEngine, A: SoundEffects, S: Storage> Controller<E, A, S> {
    pub fn new(config: GameConfig, engine: E, sfx: A, storage: S) -> Self {
        Self::with_rng(config, engine, sfx, storage, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, engine: E, sfx: A, storage: S, rng: StdRng) -> Self {
        Self {
            session: Session::new(config.grid_layout),
            speech: SpeechTrigger::new(engine, config.speech_rate),
            history: HistoryStore::new(storage, config.storage_key.clone(), config.history_cap),
            sfx,
            rng,
            config,
        }
    }

    pub fn refresh_voices(&mut self) -> bool {
        self.speech.refresh_voices()
    }

    pub fn select_voice(&mut self, name: &str) -> bool {
        self.speech.select_voice(name)
    }

    pub fn speech(&self) -> &SpeechTrigger<E> {
        &self.speech
    }

    pub fn preflight(&self, set_key: &str, count: usize) -> Preflight {
        let Some(choice) = SetChoice::from_key(set_key) else {
            return Preflight::Blocked(messages::SELECT_SET);
        };
        let size = RoundSize::from_count(count).unwrap_or(RoundSize::Five);
        let notice = if self.speech.resolver().has_voice() {
            None
        } else if self.config.require_voice {
            return Preflight::Blocked(messages::NO_VOICE_BLOCKED);
        } else {
            Some(messages::NO_VOICE_CONTINUE)
        };
        Preflight::Ready {
            selection: Selection::new(choice, size),
            notice,
        }
    }

    /// Commit a successfully loaded bank and lay out the first round.
    pub fn install_bank(&mut self, selection: Selection, bank: Vec<Question>) -> &Grid {
        self.speech.cancel();
        log::info!("bank {} loaded: {} questions", selection.set.file, bank.len());
        self.session.install(selection, bank, &mut self.rng)
    }

    pub fn start(&mut self, now: f64) {
        if let Some(q) = self.session.start(now, &mut self.rng) {
            self.speech.say(&q.reading);
        }
    }

    pub fn repeat(&self) {
        if let Some(q) = self.session.current() {
            self.speech.say(&q.reading);
        }
    }

    pub fn click(&mut self, kanji: &str) -> ClickOutcome {
        let outcome = self.session.click(kanji);
        match outcome {
            ClickOutcome::Correct(_) => self.sfx.play(Cue::Correct),
            ClickOutcome::Incorrect => self.sfx.play(Cue::Incorrect),
            ClickOutcome::Ignored => {}
        }
        outcome
    }

    /// Second half of a correct click, after the feedback delay.
    pub fn retire(&mut self, token: &RetireToken, now: f64) -> Step {
        match self.session.retire(token, now, &mut self.rng) {
            Advance::Ignored => Step::Ignored,
            Advance::Next(q) => {
                self.speech.say(&q.reading);
                Step::Next
            }
            Advance::Finished { elapsed_ms } => Step::Finished(self.finish(elapsed_ms)),
        }
    }

    fn finish(&mut self, elapsed_ms: u64) -> RoundResult {
        self.speech.cancel();
        let (set_label, mode_label) = self
            .session
            .selection()
            .map(|s| (s.set.label.as_str(), s.mode_label.as_str()))
            .unwrap_or_default();
        let record = HistoryRecord::today(set_label, mode_label, elapsed_ms);
        let history = self.history.record(record);
        log::info!("round finished in {elapsed_ms} ms");
        RoundResult {
            elapsed_ms,
            time_text: format_elapsed(elapsed_ms),
            history,
        }
    }

    pub fn retry(&mut self, now: f64) -> bool {
        self.speech.cancel();
        match self.session.retry(now, &mut self.rng) {
            Some(q) => {
                self.speech.say(&q.reading);
                true
            }
            None => false,
        }
    }

    /// Apply the answer of the quit confirmation. Nothing changes unless
    /// `confirmed`.
    pub fn quit(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.session.quit();
        self.speech.cancel();
        true
    }

    pub fn tick(&self, now: f64) -> Option<String> {
        self.session.tick(now)
    }

    pub fn history(&self) -> Vec<HistoryRecord> {
        self.history.load()
    }

    pub fn controls(&self) -> Controls {
        let phase = self.session.phase();
        Controls {
            start: phase == Phase::Selecting,
            repeat: phase == Phase::InProgress,
            retry: matches!(phase, Phase::InProgress | Phase::Finished),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
