use async_trait::async_trait;
use telegram::TelegramBot;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
#[error("alert delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Куда уходят алерты
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Алерты в лог, когда чат не настроен
pub struct LogSink;

#[async_trait]
impl AlertSink for LogSink {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        info!(alert = %text, "alert");
        Ok(())
    }
}

#[async_trait]
impl AlertSink for TelegramBot {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.send_message(text)
            .await
            .map_err(|e| NotifyError(e.to_string()))
    }
}

/// Best-effort доставка: ошибки только логируем
pub async fn notify_best_effort<S: AlertSink + ?Sized>(sink: &S, text: &str) -> bool {
    match sink.notify(text).await {
        Ok(()) => true,
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}
