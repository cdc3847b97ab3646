//! DOM side of the modal prompt. The OK/Cancel buttons are wired once by
//! `install`; each prompt is a future resolved through the shared `ModalState`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::dialog::{ModalState, Prompt};
use crate::web::dom;

thread_local! {
    static MODAL: RefCell<ModalState> = RefCell::new(ModalState::new());
}

pub fn install() -> Result<(), JsValue> {
    dom::on("modal-ok", "click", || close(true))?;
    dom::on("modal-cancel", "click", || close(false))?;
    Ok(())
}

fn close(answer: bool) {
    let closed = MODAL.with(|m| m.borrow_mut().resolve(answer));
    if closed.is_some() {
        dom::set_display("modal", "none");
    }
}

/// Show a prompt and wait for the player.
pub async fn show(prompt: Prompt) -> bool {
    dom::set_text("modal-message", &prompt.message);
    dom::set_display(
        "modal-cancel",
        if prompt.with_cancel { "inline-block" } else { "none" },
    );
    dom::set_display("modal", "flex");
    let reply = MODAL.with(|m| m.borrow_mut().open(prompt));
    reply.answer().await
}

pub async fn notice(message: impl Into<String>) {
    show(Prompt::notice(message)).await;
}

pub async fn confirm(message: impl Into<String>) -> bool {
    show(Prompt::confirm(message)).await
}
