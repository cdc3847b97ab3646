//! Screen scaffolding. A host page may ship its own markup with the same ids;
//! otherwise the screens are created here.

use wasm_bindgen::prelude::*;

use crate::bank::{GRADE_SETS, RoundSize};
use crate::web::dom::{document, escape};

pub const ROOT_ID: &str = "kk-root";

pub fn ensure_layout() -> Result<(), JsValue> {
    let doc = document()?;
    if doc.get_element_by_id("menu").is_some() {
        return Ok(());
    }
    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    let root = doc.create_element("div")?;
    root.set_id(ROOT_ID);
    root.set_inner_html(&layout_html());
    body.append_child(&root)?;
    Ok(())
}

fn layout_html() -> String {
    let sets: String = GRADE_SETS
        .iter()
        .map(|g| format!("<option value=\"{}\">{}</option>", g.key, escape(g.label)))
        .collect();
    let modes: String = RoundSize::ALL
        .iter()
        .map(|s| format!("<option value=\"{}\">{}</option>", s.count(), s.label()))
        .collect();

    format!(
        r#"<section id="menu" style="display:flex;flex-direction:column;gap:8px;">
  <h1>漢字読みかるた</h1>
  <label>学年とセット <select id="grade-set"><option value="">えらんでください</option>{sets}</select></label>
  <label>モード <select id="mode">{modes}</select></label>
  <label>音声 <select id="voice-select"></select></label>
  <button id="btn-start-from-menu">はじめる</button>
  <button id="btn-show-history">きろく</button>
</section>
<section id="game" style="display:none;flex-direction:column;gap:8px;">
  <div id="timer">0:00</div>
  <div id="card-grid" style="display:grid;gap:6px;"></div>
  <div>
    <button id="btn-start">スタート</button>
    <button id="btn-repeat" disabled>もう一度きく</button>
    <button id="btn-retry" disabled>やりなおす</button>
    <button id="btn-quit">やめる</button>
  </div>
</section>
<section id="result" style="display:none;flex-direction:column;gap:8px;">
  <div id="final-time"></div>
  <div id="result-table-container"></div>
  <button id="btn-result-retry">もう一回</button>
  <button id="btn-result-menu">メニューへ</button>
</section>
<section id="history" style="display:none;flex-direction:column;gap:8px;">
  <div id="history-table-container"></div>
  <button id="btn-history-back">もどる</button>
</section>
<div id="modal" style="display:none;position:fixed;inset:0;align-items:center;justify-content:center;background:rgba(0,0,0,0.4);">
  <div>
    <p id="modal-message" style="white-space:pre-line;"></p>
    <button id="modal-ok">OK</button>
    <button id="modal-cancel">キャンセル</button>
  </div>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_lists_every_grade_set_and_mode() {
        let html = layout_html();
        for g in GRADE_SETS {
            assert!(html.contains(&format!("value=\"{}\"", g.key)));
        }
        assert!(html.contains("<option value=\"15\">15まい</option>"));
        for id in ["card-grid", "modal-ok", "modal-cancel", "voice-select", "timer"] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
    }
}
