//! Error types shared by the game core and the browser bindings.
//!
//! Display strings of `LoadError` are shown to the player inside the modal, so
//! they are written in Japanese like the rest of the UI text.

use thiserror::Error;

/// Failure while loading a question bank. Nothing is committed when this is
/// returned: the previous bank and round stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{file} の読み込みに失敗しました (HTTP {status})")]
    Http { file: String, status: u16 },
    #[error("{file} の読み込みに失敗しました: {reason}")]
    Network { file: String, reason: String },
    #[error("{file} はJSONとして読めません: {reason}")]
    Parse { file: String, reason: String },
    #[error("{file} の形式が正しくありません (配列ではありません)")]
    NotAList { file: String },
    #[error("{file} の {index} 番目の問題が不正です: {reason}")]
    BadEntry {
        file: String,
        index: usize,
        reason: String,
    },
    #[error("問題が空です ({file})")]
    Empty { file: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech synthesis is not available on this host")]
    Unavailable,
    #[error("speech engine rejected the utterance: {0}")]
    Engine(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid game config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid game config: {0}")]
    Invalid(&'static str),
}
