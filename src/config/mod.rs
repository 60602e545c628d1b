mod domains;
mod settings;

pub use domains::{resolve_domains, DEFAULT_DOMAIN};
pub use settings::{ConfigError, Settings, TelegramSettings};
