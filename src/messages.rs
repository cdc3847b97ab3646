//! Player-facing text.

use crate::error::LoadError;

pub const SELECT_SET: &str = "学年とセットを選んでください";
pub const NO_VOICE_CONTINUE: &str = "日本語の音声が利用できません（音声なしで続行します）";
pub const NO_VOICE_BLOCKED: &str = "日本語の音声が利用できません。音声のある端末で遊んでください";
pub const CONFIRM_QUIT: &str = "ゲームを中断してメニューにもどりますか？";
pub const NO_VOICE_OPTION: &str = "音声未検出（利用不可）";
pub const NO_RECORDS: &str = "まだ記録がありません。";

pub fn load_failed(err: &LoadError) -> String {
    format!("問題データの読み込みに失敗しました\n{err}")
}

pub fn final_time(time: &str) -> String {
    format!("タイム: {time}")
}
