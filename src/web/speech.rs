//! SpeechSynthesis-backed engine.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice, window};

use crate::error::SpeechError;
use crate::speech::SpeechEngine;
use crate::voice::Voice;

#[derive(Default)]
pub struct WebSpeech;

impl WebSpeech {
    pub fn synth() -> Option<SpeechSynthesis> {
        window().and_then(|w| w.speech_synthesis().ok())
    }

    fn host_voices() -> Vec<SpeechSynthesisVoice> {
        let Some(synth) = Self::synth() else {
            return Vec::new();
        };
        let voices: Array = synth.get_voices();
        voices
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect()
    }

    /// Call `f` whenever the host reports a new voice list.
    pub fn on_voices_changed(f: impl FnMut() + 'static) -> Result<(), JsValue> {
        let Some(synth) = Self::synth() else {
            return Ok(());
        };
        let mut f = f;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| f()) as Box<dyn FnMut(_)>);
        synth.add_event_listener_with_callback("voiceschanged", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

impl SpeechEngine for WebSpeech {
    fn voices(&self) -> Vec<Voice> {
        Self::host_voices()
            .into_iter()
            .map(|v| Voice::new(v.name(), v.lang()))
            .collect()
    }

    fn cancel(&self) {
        if let Some(synth) = Self::synth() {
            synth.cancel();
        }
    }

    fn speak(&self, text: &str, voice: &Voice, rate: f32) -> Result<(), SpeechError> {
        let synth = Self::synth().ok_or(SpeechError::Unavailable)?;
        let host_voice = Self::host_voices().into_iter().find(|v| v.name() == voice.name);
        let utterance = SpeechSynthesisUtterance::new_with_text(text)
            .map_err(|e| SpeechError::Engine(format!("{e:?}")))?;
        utterance.set_voice(host_voice.as_ref());
        utterance.set_lang(if voice.lang.is_empty() {
            "ja-JP"
        } else {
            voice.lang.as_str()
        });
        utterance.set_rate(rate);
        synth.speak(&utterance);
        Ok(())
    }
}
