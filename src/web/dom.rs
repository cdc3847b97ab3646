//! Small DOM helpers shared by the browser layer.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlSelectElement, window,
};

pub fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn el(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

pub fn html(id: &str) -> Result<HtmlElement, JsValue> {
    el(id)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

pub fn select(id: &str) -> Result<HtmlSelectElement, JsValue> {
    el(id)?.dyn_into::<HtmlSelectElement>().map_err(JsValue::from)
}

pub fn set_text(id: &str, text: &str) {
    if let Ok(e) = el(id) {
        e.set_text_content(Some(text));
    }
}

pub fn set_disabled(id: &str, disabled: bool) {
    if let Ok(b) = el(id).and_then(|e| e.dyn_into::<HtmlButtonElement>().map_err(JsValue::from)) {
        b.set_disabled(disabled);
    }
}

pub fn set_display(id: &str, display: &str) {
    if let Ok(e) = html(id) {
        let _ = e.style().set_property("display", display);
    }
}

/// Top-level screens; exactly one is shown at a time.
pub const SCREENS: [&str; 4] = ["menu", "game", "result", "history"];

/// Show `screen` and hide every other one.
pub fn show_screen(screen: &str) {
    for id in SCREENS {
        set_display(id, if id == screen { "flex" } else { "none" });
    }
}

/// Text of the selected `<option>`, if any and not blank.
pub fn selected_text(id: &str) -> Option<String> {
    let text = select(id).ok()?.selected_options().item(0)?.text_content()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Register `f` for `event` on element `id` for the page lifetime.
pub fn on(id: &str, event: &str, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    let mut f = f;
    on_event(id, event, move |_| f())
}

/// Like `on`, but `f` gets the event.
pub fn on_event(id: &str, event: &str, f: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    el(id)?.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// One-shot timeout.
pub fn after(ms: u32, f: impl FnOnce() + 'static) {
    let Some(win) = window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        timeout_ms(ms),
    ) {
        log::warn!("setTimeout failed: {e:?}");
    }
}

/// `setTimeout` takes an `i32`; longer delays are clamped.
fn timeout_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Minimal escaping for text interpolated into `set_inner_html`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
