//! Kanji Karuta core crate.
//!
//! A listening game for kanji readings: a reading is spoken through the
//! browser's speech engine and the player clicks the matching kanji card.
//! Everything outside `web` is host independent and tested natively; `web`
//! binds it to the DOM, SpeechSynthesis, fetch and localStorage.

use std::sync::Once;

use wasm_bindgen::prelude::*;

pub mod bank;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod grid;
pub mod history;
pub mod messages;
pub mod round;
pub mod session;
pub mod speech;
pub mod timer;
pub mod voice;
pub mod web;

pub use bank::{GRADE_SETS, Question, RoundSize, Selection, SetChoice};
pub use config::{GameConfig, GridLayoutPolicy};
pub use controller::{Controller, Cue, Preflight, SoundEffects, Step};
pub use error::LoadError;
pub use history::{HistoryRecord, HistoryStore, MemoryStorage, Storage};
pub use session::{ClickOutcome, Phase};
pub use speech::SpeechEngine;
pub use timer::format_elapsed;
pub use voice::Voice;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

static LOGGER: Once = Once::new();

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::default()));
}

/// Build the screens (if the page lacks them) and start with default settings.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Same as `start_app`, with a JSON `GameConfig`. Bad JSON falls back to the
/// defaults after logging why.
#[wasm_bindgen]
pub fn start_app_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(config_json).unwrap_or_else(|e| {
        log::error!("{e}; using default settings");
        GameConfig::default()
    });
    web::start(config)
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
