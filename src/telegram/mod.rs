//! Minimal Telegram Bot API client.
//!
//! Only `sendMessage` is needed: the bot is an outbound notification
//! channel, not an interactive one. When no token is configured the client
//! is disabled and sends become log-only no-ops.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;

use crate::config::CONFIG;
use crate::errors::ApiError;

const API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API client over reqwest.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    token: String,
}

impl TelegramClient {
    /// Build a client from config. Returns `None` when no token is set.
    pub fn from_config() -> Option<Self> {
        if !CONFIG.telegram_enabled() {
            return None;
        }
        Some(Self {
            http: reqwest::Client::new(),
            token: CONFIG.telegram.token.clone(),
        })
    }

    /// Send a plain-text message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), ApiError> {
        let url = format!("{}/bot{}/sendMessage", API_BASE, self.token);
        let reply = self
            .http
            .post(&url)
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| ApiError::InternalServerError(format!("Telegram request failed: {}", e)))?
            .json::<ApiReply>()
            .await
            .map_err(|e| {
                ApiError::InternalServerError(format!("Telegram reply unreadable: {}", e))
            })?;

        if !reply.ok {
            warn!(
                "Telegram sendMessage to chat {} rejected: {}",
                chat_id,
                reply.description.as_deref().unwrap_or("unknown error")
            );
            return Err(ApiError::InternalServerError(
                "Telegram rejected the message".to_string(),
            ));
        }

        debug!("Telegram message delivered to chat {}", chat_id);
        Ok(())
    }
}
