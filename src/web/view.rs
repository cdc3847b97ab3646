//! Rendering of the card grid, voice picker and history tables.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::grid::{CardState, Grid};
use crate::history::HistoryRecord;
use crate::messages;
use crate::timer::format_elapsed;
use crate::voice::VoiceResolver;
use crate::web::dom::{self, escape};

pub fn card_id(index: usize) -> String {
    format!("card-{index}")
}

/// Rebuild `#card-grid`. Clicks are handled by one listener on the container
/// (see `card_kanji`), so re-rendering adds no listeners.
pub fn render_grid(grid: &Grid) -> Result<(), JsValue> {
    let container = dom::html("card-grid")?;
    container.set_inner_html("");
    let style = container.style();
    style.set_property(
        "grid-template-columns",
        &format!("repeat({}, 1fr)", grid.layout.cols),
    )?;
    style.set_property(
        "grid-template-rows",
        &format!("repeat({}, auto)", grid.layout.rows),
    )?;

    let doc = dom::document()?;
    for (i, card) in grid.cards().iter().enumerate() {
        let node = doc.create_element("div")?;
        node.set_id(&card_id(i));
        node.set_class_name(card_class(card.state));
        node.set_attribute("data-kanji", &card.kanji)?;
        node.set_attribute("data-reading", &card.reading)?;
        node.set_inner_html(&format!("<div class=\"kanji\">{}</div>", escape(&card.kanji)));
        container.append_child(&node)?;
    }
    Ok(())
}

/// Kanji of the card a click inside `#card-grid` landed on.
pub fn card_kanji(event: &Event) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest("[data-kanji]").ok()??.get_attribute("data-kanji")
}

fn card_class(state: CardState) -> &'static str {
    match state {
        CardState::Visible => "card",
        CardState::Matched => "card correct",
        CardState::Hidden => "card hidden",
    }
}

/// Swap the feedback class on a card, e.g. `correct` → `hidden`.
pub fn flag_card(index: usize, add: &str, remove: Option<&str>) {
    if let Ok(node) = dom::el(&card_id(index)) {
        let classes = node.class_list();
        if let Some(r) = remove {
            let _ = classes.remove_1(r);
        }
        let _ = classes.add_1(add);
    }
}

pub fn unflag_card(index: usize, class: &str) {
    if let Ok(node) = dom::el(&card_id(index)) {
        let _ = node.class_list().remove_1(class);
    }
}

pub fn hide_card(index: usize) {
    flag_card(index, "hidden", Some("correct"));
    if let Ok(node) = dom::html(&card_id(index)) {
        let _ = node.style().set_property("visibility", "hidden");
    }
}

pub fn render_voice_select(resolver: &VoiceResolver) -> Result<(), JsValue> {
    dom::select("voice-select")?.set_inner_html(&voice_options_html(resolver));
    if let Some(name) = resolver.active_name() {
        dom::select("voice-select")?.set_value(name);
    }
    Ok(())
}

fn voice_options_html(resolver: &VoiceResolver) -> String {
    if resolver.candidates().is_empty() {
        return format!("<option value=\"\">{}</option>", messages::NO_VOICE_OPTION);
    }
    resolver
        .candidates()
        .iter()
        .map(|v| {
            format!(
                "<option value=\"{}\">{}</option>",
                escape(&v.name),
                escape(&v.display_name())
            )
        })
        .collect()
}

pub fn history_table_html(rows: &[HistoryRecord]) -> String {
    if rows.is_empty() {
        return format!("<p>{}</p>", messages::NO_RECORDS);
    }
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                i + 1,
                escape(&r.date),
                escape(&r.grade_set),
                escape(&r.mode),
                format_elapsed(r.time_ms)
            )
        })
        .collect();
    format!(
        "<div class=\"table-wrap\"><table><thead><tr><th>回</th><th>日付</th><th>学年とセット</th><th>モード</th><th>タイム</th></tr></thead><tbody>{body}</tbody></table></div>"
    )
}

pub fn render_history(container_id: &str, rows: &[HistoryRecord]) -> Result<(), JsValue> {
    dom::el(container_id)?.set_inner_html(&history_table_html(rows));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::Voice;

    #[test]
    fn empty_history_shows_notice() {
        assert_eq!(history_table_html(&[]), "<p>まだ記録がありません。</p>");
    }

    #[test]
    fn history_rows_are_numbered_and_escaped() {
        let rows = [
            HistoryRecord {
                date: "2024-05-01".into(),
                grade_set: "<script>".into(),
                mode: "5まい".into(),
                time_ms: 125_000,
            },
            HistoryRecord {
                date: "2024-04-30".into(),
                grade_set: "1年生".into(),
                mode: "10まい".into(),
                time_ms: 9_000,
            },
        ];
        let html = history_table_html(&rows);
        assert!(html.contains("<tr><td>1</td><td>2024-05-01</td><td>&lt;script&gt;</td><td>5まい</td><td>2:05</td></tr>"));
        assert!(html.contains("<td>2</td>"));
        assert!(html.contains("<td>0:09</td>"));
    }

    #[test]
    fn voice_options_fall_back_to_placeholder() {
        let mut r = VoiceResolver::new();
        assert!(voice_options_html(&r).contains(messages::NO_VOICE_OPTION));
        r.resolve(vec![Voice::new("Kyoko", "ja-JP")]);
        assert_eq!(
            voice_options_html(&r),
            "<option value=\"Kyoko\">Kyoko (ja-JP)</option>"
        );
    }
}
