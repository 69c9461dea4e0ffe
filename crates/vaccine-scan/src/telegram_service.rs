use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::executor::NotificationError;

/// Trait for message transports delivering preformatted notification text
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver one message through the channel
    async fn send_message(&self, text: &str) -> Result<(), NotificationError>;
}

/// Telegram bot transport
pub struct TelegramMessenger {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramMessenger {
    /// Create a new Telegram transport for the given bot token and chat
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_message(&self, text: &str) -> Result<(), NotificationError> {
        info!("Sending Telegram message to chat {}", self.chat_id);

        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.bot_token
        );
        let params = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "html"),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| NotificationError::Telegram(format!("send failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(NotificationError::Telegram(format!(
                "HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Mock messenger for development/testing, recording every message
pub struct MockMessenger {
    /// Messages delivered so far, in send order
    pub sent: Mutex<Vec<String>>,
}

impl MockMessenger {
    /// Create an empty recording messenger
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_message(&self, text: &str) -> Result<(), NotificationError> {
        info!("[MOCK MESSENGER] {}", text);

        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
