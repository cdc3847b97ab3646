//! Sound effects and localStorage bindings.

use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, window};

use crate::config::GameConfig;
use crate::controller::{Cue, SoundEffects};
use crate::error::StorageError;
use crate::history::Storage;

pub struct WebSfx {
    correct_url: String,
    incorrect_url: String,
}

impl WebSfx {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            correct_url: config.sound_url(Cue::Correct.name()),
            incorrect_url: config.sound_url(Cue::Incorrect.name()),
        }
    }

    fn url(&self, cue: Cue) -> &str {
        match cue {
            Cue::Correct => &self.correct_url,
            Cue::Incorrect => &self.incorrect_url,
        }
    }
}

impl SoundEffects for WebSfx {
    fn play(&self, cue: Cue) {
        let url = self.url(cue);
        let played: Result<Promise, _> =
            HtmlAudioElement::new_with_src(url).and_then(|audio| audio.play());
        match played {
            // Autoplay policies reject the promise; the game goes on silently.
            Ok(promise) => {
                let url = url.to_string();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("{url} not played: {e:?}");
                    }
                });
            }
            Err(e) => log::debug!("{url} not played: {e:?}"),
        }
    }
}

pub struct LocalStorage;

impl LocalStorage {
    fn store() -> Result<web_sys::Storage, StorageError> {
        window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Read(format!("{e:?}")))?
            .ok_or(StorageError::Unavailable)
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::store()?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::store()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}
