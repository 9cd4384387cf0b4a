//! Минимальный клиент Bot API: отправка алертов в один чат

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram rejected message: {0}")]
    Rejected(String),
}

#[derive(Clone)]
pub struct TelegramBot {
    client: reqwest::Client,
    base: String,
    token: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramBot {
    pub fn new(token: &str, chat_id: &str, timeout: Duration) -> Result<Self, TelegramError> {
        Self::with_base(DEFAULT_API_URL, token, chat_id, timeout)
    }

    pub fn with_base(
        base: &str,
        token: &str,
        chat_id: &str,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    /// Отправка `text` (parse_mode Markdown)
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/sendMessage", self.base, self.token);

        // при ошибочном статусе тело всё равно JSON с description
        let resp: ApiResponse = self
            .client
            .post(url)
            .json(&message_payload(&self.chat_id, text))
            .send()
            .await?
            .json()
            .await?;

        check_response(resp)
    }
}

fn message_payload(chat_id: &str, text: &str) -> Value {
    json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "Markdown",
    })
}

fn check_response(resp: ApiResponse) -> Result<(), TelegramError> {
    if resp.ok {
        return Ok(());
    }

    Err(TelegramError::Rejected(
        resp.description.unwrap_or_else(|| "no description".to_string()),
    ))
}
