//! SMS delivery through the Textbelt HTTP API.

use std::time::Duration;

use serde::Deserialize;

use super::Notifier;
use crate::config::NotifierConfig;

/// Public Textbelt endpoint.
pub const DEFAULT_TEXTBELT_URL: &str = "https://textbelt.com/text";

/// Free-tier key (one SMS per day).
const FREE_KEY: &str = "textbelt";

/// Textbelt delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("message rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Deserialize)]
struct TextbeltReply {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Sends each alert as an SMS on a detached task.
#[derive(Clone)]
pub struct TextbeltNotifier {
    client: reqwest::Client,
    url: String,
    phone: String,
    key: String,
}

impl TextbeltNotifier {
    /// Create a notifier from configuration.
    ///
    /// Missing phone numbers are rejected by config validation; here they
    /// simply make every send fail at the endpoint.
    pub fn new(config: &NotifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            url: config
                .url
                .clone()
                .unwrap_or_else(|| DEFAULT_TEXTBELT_URL.to_string()),
            phone: config.phone.clone().unwrap_or_default(),
            key: config.key.clone().unwrap_or_else(|| FREE_KEY.to_string()),
        }
    }

    /// Deliver one message and wait for the endpoint's verdict.
    pub async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .form(&[
                ("phone", self.phone.as_str()),
                ("message", message),
                ("key", self.key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        let reply: TextbeltReply = response.json().await?;
        if reply.success {
            Ok(())
        } else {
            Err(NotifyError::Rejected(
                reply.error.unwrap_or_else(|| "no reason given".to_string()),
            ))
        }
    }
}

impl Notifier for TextbeltNotifier {
    fn notify(&self, message: &str) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(%message, "no async runtime; SMS not sent");
            return;
        };

        let notifier = self.clone();
        let message = message.to_string();
        runtime.spawn(async move {
            match notifier.send(&message).await {
                Ok(()) => tracing::info!(%message, "SMS sent"),
                Err(e) => tracing::warn!(error = %e, %message, "SMS delivery failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotifierKind;

    #[test]
    fn test_defaults_fill_url_and_key() {
        let config = NotifierConfig {
            kind: NotifierKind::Textbelt,
            phone: Some("+15555555555".to_string()),
            ..NotifierConfig::default()
        };
        let notifier = TextbeltNotifier::new(&config);
        assert_eq!(notifier.url, DEFAULT_TEXTBELT_URL);
        assert_eq!(notifier.key, FREE_KEY);
        assert_eq!(notifier.phone, "+15555555555");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let config = NotifierConfig {
            kind: NotifierKind::Textbelt,
            url: Some("http://127.0.0.1:9/text".to_string()),
            phone: Some("+15555555555".to_string()),
            timeout_seconds: 1,
            ..NotifierConfig::default()
        };
        let notifier = TextbeltNotifier::new(&config);
        assert!(matches!(
            notifier.send("hello").await,
            Err(NotifyError::Request(_))
        ));
    }
}
