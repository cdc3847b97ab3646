//! Modal prompts as single-use futures.
//!
//! `ModalState::open` hands back a `PromptReply` that resolves once, when the
//! UI calls `resolve`. Button wiring never changes per prompt; the OK/Cancel
//! handlers just resolve whatever prompt is pending.

use futures::channel::oneshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub with_cancel: bool,
}

impl Prompt {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            with_cancel: false,
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            with_cancel: true,
        }
    }

    /// Answer used when the prompt is dismissed without a click.
    fn default_answer(&self) -> bool {
        !self.with_cancel
    }
}

pub struct PromptReply {
    rx: oneshot::Receiver<bool>,
    default: bool,
}

impl PromptReply {
    pub async fn answer(self) -> bool {
        self.rx.await.unwrap_or(self.default)
    }
}

#[derive(Default)]
pub struct ModalState {
    pending: Option<(Prompt, oneshot::Sender<bool>)>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `prompt`. A prompt still pending is closed with its default answer.
    pub fn open(&mut self, prompt: Prompt) -> PromptReply {
        if let Some((old, tx)) = self.pending.take() {
            let _ = tx.send(old.default_answer());
        }
        let (tx, rx) = oneshot::channel();
        let default = prompt.default_answer();
        self.pending = Some((prompt, tx));
        PromptReply { rx, default }
    }

    /// Close the pending prompt with `answer`. Notices always answer true.
    pub fn resolve(&mut self, answer: bool) -> Option<Prompt> {
        let (prompt, tx) = self.pending.take()?;
        let answer = answer || !prompt.with_cancel;
        let _ = tx.send(answer);
        Some(prompt)
    }

    pub fn current(&self) -> Option<&Prompt> {
        self.pending.as_ref().map(|(p, _)| p)
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn confirm_resolves_once_with_choice() {
        let mut modal = ModalState::new();
        let reply = modal.open(Prompt::confirm("やめますか？"));
        assert_eq!(modal.current().unwrap().message, "やめますか？");
        assert!(modal.resolve(false).is_some());
        assert!(modal.resolve(true).is_none());
        assert!(!block_on(reply.answer()));
    }

    #[test]
    fn notice_is_always_true() {
        let mut modal = ModalState::new();
        let reply = modal.open(Prompt::notice("えらんでください"));
        modal.resolve(false);
        assert!(block_on(reply.answer()));
    }

    #[test]
    fn superseded_prompt_gets_default() {
        let mut modal = ModalState::new();
        let first = modal.open(Prompt::confirm("a"));
        let second = modal.open(Prompt::notice("b"));
        assert!(!block_on(first.answer()));
        modal.resolve(true);
        assert!(block_on(second.answer()));
        assert!(!modal.is_open());
    }
}
