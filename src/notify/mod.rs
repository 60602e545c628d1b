mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use tracing::warn;

/// Best-effort message sink. Delivery failures are logged by the
/// implementation and never returned to the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Used when no messaging credentials are configured.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, message: &str) {
        warn!("Notifications not configured, message not sent: {}", message);
    }
}
