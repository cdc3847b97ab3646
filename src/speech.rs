//! Speech trigger: at most one utterance at a time, through the resolved voice.

use crate::error::SpeechError;
use crate::voice::{Voice, VoiceResolver};

/// Host text-to-speech engine.
pub trait SpeechEngine {
    /// Voices currently installed. May be empty early in page life.
    fn voices(&self) -> Vec<Voice>;
    fn cancel(&self);
    fn speak(&self, text: &str, voice: &Voice, rate: f32) -> Result<(), SpeechError>;
}

pub struct SpeechTrigger<E: SpeechEngine> {
    engine: E,
    resolver: VoiceResolver,
    rate: f32,
}

impl<E: SpeechEngine> SpeechTrigger<E> {
    pub fn new(engine: E, rate: f32) -> Self {
        Self {
            engine,
            resolver: VoiceResolver::new(),
            rate,
        }
    }

    /// Re-read the host voice list. Safe to call on every `voiceschanged`.
    pub fn refresh_voices(&mut self) -> bool {
        let voices = self.engine.voices();
        let changed = self.resolver.resolve(voices);
        if changed {
            match self.resolver.active() {
                Some(v) => log::info!("voice selected: {}", v.display_name()),
                None => log::warn!("no speech voice installed, continuing without audio"),
            }
        }
        changed
    }

    pub fn select_voice(&mut self, name: &str) -> bool {
        self.resolver.select(name)
    }

    pub fn resolver(&self) -> &VoiceResolver {
        &self.resolver
    }

    /// Cancel whatever is playing, then speak `text`. Silently does nothing
    /// without a voice or text; engine failures are logged.
    pub fn say(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(voice) = self.resolver.active() else {
            return;
        };
        self.engine.cancel();
        if let Err(e) = self.engine.speak(text, voice, self.rate) {
            log::warn!("speech error: {e}");
        }
    }

    pub fn cancel(&self) {
        self.engine.cancel();
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
