//! Question bank download.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, window};

use crate::bank::{Question, parse_bank};
use crate::error::LoadError;

pub async fn fetch_bank(url: &str, file: &str) -> Result<Vec<Question>, LoadError> {
    let network = |reason: String| LoadError::Network {
        file: file.to_string(),
        reason,
    };
    let win = window().ok_or_else(|| network("no window".to_string()))?;
    let resp = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(|e| network(format!("{e:?}")))?;
    let resp = resp
        .dyn_into::<Response>()
        .map_err(|e| network(format!("unexpected fetch result {e:?}")))?;
    if !resp.ok() {
        return Err(LoadError::Http {
            file: file.to_string(),
            status: resp.status(),
        });
    }
    let text = JsFuture::from(resp.text().map_err(|e| network(format!("{e:?}")))?)
        .await
        .map_err(|e| network(format!("{e:?}")))?
        .as_string()
        .unwrap_or_default();
    parse_bank(file, &text)
}
