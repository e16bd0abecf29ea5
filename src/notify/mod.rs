//! Best-effort outbound alerts
//!
//! A notifier is fire-and-forget: it is only called after the machine lock
//! has been released, and a failed delivery is logged and dropped. State
//! transitions are never rolled back or retried because of it.

mod textbelt;

pub use textbelt::{TextbeltNotifier, DEFAULT_TEXTBELT_URL};

use std::sync::{Arc, Mutex};

use crate::config::{NotifierConfig, NotifierKind};

/// Transition edges that produce an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The countdown reached zero on its own
    CycleComplete,
    /// The device reported a stop with no time left
    FinishComplete,
    /// The device reported a stop with time still on the clock
    FinishAborted,
    /// An aborted cycle went unclaimed and the machine locked
    AutoLock,
}

impl Notice {
    /// Human-readable alert text.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::CycleComplete => "Laundry: your cycle is COMPLETE.",
            Notice::FinishComplete => "Laundry: cycle COMPLETE.",
            Notice::FinishAborted => "Laundry: cycle ABORTED.",
            Notice::AutoLock => "Laundry: machine LOCKED (aborted cycle not cleared).",
        }
    }
}

/// Outbound alert channel.
pub trait Notifier: Send + Sync {
    /// Send `message` without blocking the caller. Must not panic on failure.
    fn notify(&self, message: &str);
}

/// Writes alerts to the server log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(%message, "notification");
    }
}

/// Drops every alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!(%message, "notifications disabled; dropping");
    }
}

/// Keeps every alert in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

/// Build the notifier described by `config`.
pub fn from_config(config: &NotifierConfig) -> Arc<dyn Notifier> {
    match config.kind {
        NotifierKind::None => Arc::new(DisabledNotifier),
        NotifierKind::Log => Arc::new(LogNotifier),
        NotifierKind::Textbelt => Arc::new(TextbeltNotifier::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::FinishAborted.message());
        notifier.notify(Notice::AutoLock.message());

        assert_eq!(
            notifier.messages(),
            vec![
                "Laundry: cycle ABORTED.".to_string(),
                "Laundry: machine LOCKED (aborted cycle not cleared).".to_string(),
            ]
        );
    }

    #[test]
    fn test_every_notice_has_text() {
        for notice in [
            Notice::CycleComplete,
            Notice::FinishComplete,
            Notice::FinishAborted,
            Notice::AutoLock,
        ] {
            assert!(notice.message().starts_with("Laundry: "));
        }
    }

    #[test]
    fn test_from_config_without_runtime_does_not_panic() {
        let config = NotifierConfig {
            kind: NotifierKind::Textbelt,
            phone: Some("+15555555555".to_string()),
            ..NotifierConfig::default()
        };
        // No tokio runtime here: the alert is dropped with a warning.
        from_config(&config).notify("hello");
    }
}
