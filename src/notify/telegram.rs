use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::Notifier;
use crate::config::TelegramSettings;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TelegramNotifier {
    client: Client,
    settings: TelegramSettings,
    base_url: String,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("settings", &self.settings)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(settings: TelegramSettings) -> Result<Self> {
        Self::with_base_url(settings, TELEGRAM_API_BASE)
    }

    pub fn with_base_url(settings: TelegramSettings, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create Telegram API client")?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            settings,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.settings.bot_token)
    }

    async fn send_message(&self, text: &str) -> Result<()> {
        let form = [("chat_id", self.settings.chat_id.as_str()), ("text", text)];

        // The URL embeds the bot token, so reqwest errors are stripped of it.
        let response = self
            .client
            .post(self.send_message_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("Failed to send Telegram message")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram API error ({}): {}", status, body);
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) {
        match self.send_message(message).await {
            Ok(()) => debug!("Telegram message sent to chat {}", self.settings.chat_id),
            Err(e) => warn!("Error sending telegram message: {:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TelegramSettings {
        TelegramSettings {
            bot_token: "123456:secret-token".to_string(),
            chat_id: "-1001234".to_string(),
        }
    }

    #[test]
    fn test_send_message_url() {
        let notifier = TelegramNotifier::new(settings()).unwrap();
        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123456:secret-token/sendMessage"
        );
    }

    #[test]
    fn test_token_not_exposed_in_debug() {
        let notifier = TelegramNotifier::new(settings()).unwrap();

        let debug_str = format!("{:?}", notifier);
        assert!(!debug_str.contains("secret-token"));
        assert!(debug_str.contains("-1001234"));
    }
}
