use std::fmt;

use thiserror::Error;

use super::domains::resolve_domains;
use crate::dns::Credentials;

pub const CLOUDFLARE_EMAIL: &str = "CLOUDFLARE_EMAIL";
pub const CLOUDFLARE_API_KEY: &str = "CLOUDFLARE_API_KEY";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const DOMAINS: &str = "DOMAINS";
pub const DOMAIN: &str = "DOMAIN";
pub const IP_ECHO_URL: &str = "IP_ECHO_URL";

fn default_ip_echo_url() -> String {
    "https://ipinfo.io/ip".to_string()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable(s) not set: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub cloudflare: Credentials,
    pub telegram: Option<TelegramSettings>,
    pub domains: Vec<String>,
    pub ip_echo_url: String,
}

#[derive(Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"<REDACTED>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Empty values count as unset. Every missing key is reported in a
    /// single [`ConfigError::MissingKeys`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut missing = Vec::new();

        let email = get(CLOUDFLARE_EMAIL);
        let api_key = get(CLOUDFLARE_API_KEY);
        if email.is_none() {
            missing.push(CLOUDFLARE_EMAIL);
        }
        if api_key.is_none() {
            missing.push(CLOUDFLARE_API_KEY);
        }

        // A half-configured notifier can never deliver, so one key without
        // the other is treated like a missing required key.
        let telegram = match (get(TELEGRAM_BOT_TOKEN), get(TELEGRAM_CHAT_ID)) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramSettings { bot_token, chat_id }),
            (Some(_), None) => {
                missing.push(TELEGRAM_CHAT_ID);
                None
            }
            (None, Some(_)) => {
                missing.push(TELEGRAM_BOT_TOKEN);
                None
            }
            (None, None) => None,
        };

        let (Some(email), Some(api_key)) = (email, api_key) else {
            return Err(ConfigError::MissingKeys(missing));
        };
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        let domains = resolve_domains(
            lookup(DOMAINS).as_deref(),
            lookup(DOMAIN).as_deref(),
        );

        Ok(Settings {
            cloudflare: Credentials { email, api_key },
            telegram,
            domains,
            ip_echo_url: get(IP_ECHO_URL).unwrap_or_else(default_ip_echo_url),
        })
    }
}
