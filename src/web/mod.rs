//! Browser bindings: DOM wiring, timers and host services.
//!
//! The single `App` lives in a thread-local cell like the rest of the page
//! state. Event handlers borrow it briefly through `with_app`; no borrow is held
//! across an `.await` (fetch and modal prompts run between borrows).

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::GameConfig;
use crate::controller::{Controller, Preflight, RoundResult, Step};
use crate::messages;
use crate::performance_now;
use crate::session::{ClickOutcome, Phase, RetireToken};

pub mod dom;
mod fetch;
mod layout;
mod modal;
mod platform;
mod speech;
mod view;

pub use platform::{LocalStorage, WebSfx};
pub use speech::WebSpeech;
pub use view::history_table_html;

type WebController = Controller<WebSpeech, WebSfx, LocalStorage>;

/// Live `setInterval` for the round clock. Dropping it frees the callback, so
/// the interval must be cleared first (see `stop_ticker`).
struct Ticker {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

struct App {
    controller: WebController,
    ticker: Option<Ticker>,
    voice_polls: u32,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> Option<T> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    layout::ensure_layout()?;
    let sfx = WebSfx::new(&config);
    let controller = Controller::new(config, WebSpeech, sfx, LocalStorage);
    APP.with(|cell| {
        cell.replace(Some(App {
            controller,
            ticker: None,
            voice_polls: 0,
        }))
    });

    modal::install()?;
    wire_controls()?;
    WebSpeech::on_voices_changed(refresh_voices)?;
    refresh_voices();
    sync_controls();
    log::info!("kanji karuta ready");
    Ok(())
}

fn wire_controls() -> Result<(), JsValue> {
    dom::on("btn-start-from-menu", "click", || {
        wasm_bindgen_futures::spawn_local(start_from_menu())
    })?;
    dom::on("btn-show-history", "click", show_history)?;
    dom::on("btn-start", "click", start_round)?;
    dom::on("btn-repeat", "click", || {
        with_app(|app| app.controller.repeat());
    })?;
    dom::on("btn-retry", "click", retry)?;
    dom::on("btn-quit", "click", || wasm_bindgen_futures::spawn_local(quit()))?;
    dom::on_event("card-grid", "click", |evt| {
        if let Some(kanji) = view::card_kanji(&evt) {
            on_card_click(kanji);
        }
    })?;
    dom::on("btn-result-retry", "click", || {
        dom::show_screen("game");
        retry();
    })?;
    dom::on("btn-result-menu", "click", || {
        with_app(|app| {
            stop_ticker(app);
            app.controller.quit(true);
        });
        dom::show_screen("menu");
    })?;
    dom::on("btn-history-back", "click", || dom::show_screen("menu"))?;
    dom::on("voice-select", "change", || {
        let Ok(name) = dom::select("voice-select").map(|s| s.value()) else {
            return;
        };
        if with_app(|app| app.controller.select_voice(&name)) == Some(false) {
            log::warn!("voice {name} is no longer installed");
        }
    })?;
    Ok(())
}

/// Re-resolve voices; fired by `voiceschanged` and by the fallback poll while
/// the host still reports an empty list.
fn refresh_voices() {
    let poll_in = with_app(|app| {
        app.controller.refresh_voices();
        let resolver = app.controller.speech().resolver();
        if let Err(e) = view::render_voice_select(resolver) {
            log::warn!("voice picker not rendered: {e:?}");
        }
        let cfg = app.controller.config();
        let waiting = resolver.installed_count() == 0
            && WebSpeech::synth().is_some()
            && app.voice_polls < cfg.voice_poll_limit;
        if waiting {
            app.voice_polls += 1;
            Some(cfg.voice_poll_ms)
        } else {
            None
        }
    })
    .flatten();
    if let Some(ms) = poll_in {
        dom::after(ms, refresh_voices);
    }
}

fn sync_controls() {
    let Some(c) = with_app(|app| app.controller.controls()) else {
        return;
    };
    dom::set_disabled("btn-start", !c.start);
    dom::set_disabled("btn-repeat", !c.repeat);
    dom::set_disabled("btn-retry", !c.retry);
}

async fn start_from_menu() {
    let set_key = dom::select("grade-set").map(|s| s.value()).unwrap_or_default();
    let count = dom::select("mode")
        .ok()
        .and_then(|s| s.value().parse::<usize>().ok())
        .unwrap_or(5);
    let set_text = dom::selected_text("grade-set");
    let mode_text = dom::selected_text("mode");

    let Some(preflight) = with_app(|app| app.controller.preflight(&set_key, count)) else {
        return;
    };
    let selection = match preflight {
        Preflight::Blocked(message) => {
            modal::notice(message).await;
            return;
        }
        Preflight::Ready { selection, notice } => {
            if let Some(message) = notice {
                modal::notice(message).await;
            }
            selection.with_menu_text(set_text.as_deref(), mode_text.as_deref())
        }
    };

    let file = selection.set.file.clone();
    let Some(url) = with_app(|app| app.controller.config().bank_url(&file)) else {
        return;
    };
    match fetch::fetch_bank(&url, &file).await {
        Ok(bank) => {
            let rendered = with_app(|app| {
                stop_ticker(app);
                let grid = app.controller.install_bank(selection, bank);
                view::render_grid(grid)
            });
            if let Some(Err(e)) = rendered {
                log::error!("grid not rendered: {e:?}");
            }
            dom::set_text("timer", "0:00");
            sync_controls();
            dom::show_screen("game");
        }
        Err(e) => {
            log::error!("{e}");
            modal::notice(messages::load_failed(&e)).await;
        }
    }
}

fn start_round() {
    let now = performance_now();
    with_app(|app| {
        app.controller.start(now);
        if app.controller.session().phase() == Phase::InProgress {
            start_ticker(app);
        }
    });
    dom::set_text("timer", "0:00");
    sync_controls();
}

fn on_card_click(kanji: String) {
    let Some((outcome, index, delay)) = with_app(|app| {
        let index = app
            .controller
            .session()
            .grid()
            .and_then(|g| g.index_of(&kanji));
        let outcome = app.controller.click(&kanji);
        (outcome, index, app.controller.config().feedback_ms)
    }) else {
        return;
    };
    let Some(index) = index else {
        return;
    };
    match outcome {
        ClickOutcome::Correct(token) => {
            view::flag_card(index, "correct", None);
            dom::after(delay, move || retire(token, index));
        }
        ClickOutcome::Incorrect => {
            view::flag_card(index, "incorrect", None);
            dom::after(delay, move || view::unflag_card(index, "incorrect"));
        }
        ClickOutcome::Ignored => {}
    }
}

fn retire(token: RetireToken, index: usize) {
    let now = performance_now();
    let Some(step) = with_app(|app| app.controller.retire(&token, now)) else {
        return;
    };
    match step {
        Step::Ignored => {}
        Step::Next => view::hide_card(index),
        Step::Finished(result) => {
            view::hide_card(index);
            with_app(stop_ticker);
            show_result(&result);
        }
    }
}

fn show_result(result: &RoundResult) {
    dom::set_text("final-time", &messages::final_time(&result.time_text));
    if let Err(e) = view::render_history("result-table-container", &result.history) {
        log::warn!("result table not rendered: {e:?}");
    }
    sync_controls();
    dom::show_screen("result");
}

fn retry() {
    let now = performance_now();
    let restarted = with_app(|app| {
        stop_ticker(app);
        if !app.controller.retry(now) {
            return false;
        }
        if let Some(grid) = app.controller.session().grid() {
            if let Err(e) = view::render_grid(grid) {
                log::error!("grid not rendered: {e:?}");
            }
        }
        start_ticker(app);
        true
    });
    if restarted == Some(true) {
        dom::set_text("timer", "0:00");
    }
    sync_controls();
}

async fn quit() {
    let confirmed = modal::confirm(messages::CONFIRM_QUIT).await;
    let quit = with_app(|app| {
        let quit = app.controller.quit(confirmed);
        if quit {
            stop_ticker(app);
        }
        quit
    });
    if quit == Some(true) {
        sync_controls();
        dom::show_screen("menu");
    }
}

fn show_history() {
    let rows = with_app(|app| app.controller.history()).unwrap_or_default();
    if let Err(e) = view::render_history("history-table-container", &rows) {
        log::warn!("history table not rendered: {e:?}");
    }
    dom::show_screen("history");
}

fn start_ticker(app: &mut App) {
    stop_ticker(app);
    let Some(win) = window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
    match win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        1000,
    ) {
        Ok(handle) => {
            app.ticker = Some(Ticker {
                handle,
                _closure: closure,
            })
        }
        Err(e) => log::error!("setInterval failed: {e:?}"),
    }
}

fn stop_ticker(app: &mut App) {
    if let Some(ticker) = app.ticker.take() {
        if let Some(win) = window() {
            win.clear_interval_with_handle(ticker.handle);
        }
    }
}

fn on_tick() {
    let now = performance_now();
    if let Some(Some(text)) = with_app(|app| app.controller.tick(now)) {
        dom::set_text("timer", &text);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::*;
    use web_sys::{Event, EventTarget};

    use super::{dom, layout, view};
    use crate::bank::Question;
    use crate::config::GridLayoutPolicy;
    use crate::grid::Grid;

    wasm_bindgen_test_configure!(run_in_browser);

    fn grid(n: usize) -> Grid {
        let qs: Vec<_> = (0..n)
            .map(|i| Question::new(format!("字{i}"), format!("よみ{i}")))
            .collect();
        Grid::new(&qs, n, GridLayoutPolicy::Rows)
    }

    #[wasm_bindgen_test]
    fn rerendered_grid_resolves_clicks_from_inner_nodes() {
        layout::ensure_layout().unwrap();
        view::render_grid(&grid(10)).unwrap();
        view::render_grid(&grid(5)).unwrap();
        let container = dom::el("card-grid").unwrap();
        assert_eq!(container.child_element_count(), 5);

        let inner = dom::document()
            .unwrap()
            .query_selector("#card-3 .kanji")
            .unwrap()
            .unwrap();
        let evt = Event::new("click").unwrap();
        EventTarget::from(inner).dispatch_event(&evt).unwrap();
        assert_eq!(view::card_kanji(&evt).as_deref(), Some("字3"));
    }

    #[wasm_bindgen_test]
    fn only_one_screen_is_visible() {
        layout::ensure_layout().unwrap();
        dom::show_screen("game");
        dom::show_screen("result");
        dom::show_screen("menu");
        for id in dom::SCREENS {
            let shown = dom::html(id).unwrap().style().get_property_value("display").unwrap();
            assert_eq!(shown == "none", id != "menu", "{id}");
        }
    }
}
