use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Feedback surface the controllers talk to: a busy indicator, transient
/// messages and yes/no confirmation.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn show_spinner(&self, visible: bool);

    fn show_message(&self, text: &str, kind: MessageKind);

    async fn confirm(&self, message: &str) -> bool;
}

/// Headless [`Notifier`] that writes everything to the log.
///
/// Confirmations are answered with a fixed value.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    confirm_answer: bool,
}

impl TracingNotifier {
    pub fn new(confirm_answer: bool) -> Self {
        Self { confirm_answer }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    fn show_spinner(&self, _visible: bool) {}

    fn show_message(&self, text: &str, kind: MessageKind) {
        match kind {
            MessageKind::Error => error!(message = text, "Toast"),
            MessageKind::Warning => warn!(message = text, "Toast"),
            MessageKind::Info | MessageKind::Success => info!(message = text, "Toast"),
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        info!(prompt = message, answer = self.confirm_answer, "Confirm");
        self.confirm_answer
    }
}

/// Everything a [`RecordingNotifier`] saw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Spinner(bool),
    Message(MessageKind, String),
    Confirm(String),
}

/// [`Notifier`] that keeps every event for later assertions.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<UiEvent>>>,
    confirm_answer: Arc<Mutex<bool>>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RecordingNotifier {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            confirm_answer: Arc::new(Mutex::new(confirm_answer)),
        }
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        if let Ok(mut current) = self.confirm_answer.lock() {
            *current = answer;
        }
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<(MessageKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Message(kind, text) => Some((kind, text)),
                _ => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> Option<(MessageKind, String)> {
        self.messages().pop()
    }

    /// True when every spinner that was shown has been hidden again.
    pub fn spinner_hidden(&self) -> bool {
        let mut visible = false;
        for event in self.events() {
            if let UiEvent::Spinner(shown) = event {
                visible = shown;
            }
        }
        !visible
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    fn record(&self, event: UiEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn show_spinner(&self, visible: bool) {
        self.record(UiEvent::Spinner(visible));
    }

    fn show_message(&self, text: &str, kind: MessageKind) {
        self.record(UiEvent::Message(kind, text.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.record(UiEvent::Confirm(message.to_string()));
        self.confirm_answer.lock().map(|a| *a).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier() {
        let ui = RecordingNotifier::new(false);
        ui.show_spinner(true);
        ui.show_message("hola", MessageKind::Info);
        assert!(!ui.confirm("¿Seguro?").await);
        assert!(!ui.spinner_hidden());
        ui.show_spinner(false);

        assert!(ui.spinner_hidden());
        assert_eq!(ui.last_message(), Some((MessageKind::Info, "hola".to_string())));
        assert_eq!(ui.events()[2], UiEvent::Confirm("¿Seguro?".into()));

        ui.set_confirm_answer(true);
        assert!(ui.confirm("¿Seguro?").await);
    }
}
