// src/services/telegram.rs

//! Telegram bot API client.
//!
//! Sends text messages to the configured chat and long-polls inbound updates.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Credentials;
use crate::error::{AppError, Result};
use crate::models::{TelegramConfig, Update, UpdateResponse};

/// Outbound and inbound messaging channel.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message to the configured chat.
    async fn send_message(&self, text: &str) -> Result<()>;

    /// Fetch inbound updates with `update_id >= offset`.
    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>>;
}

/// Messenger backed by the Telegram bot HTTP API.
pub struct TelegramClient {
    client: Client,
    api_base: String,
    parse_mode: String,
    credentials: Credentials,
}

impl TelegramClient {
    pub fn new(client: Client, config: &TelegramConfig, credentials: Credentials) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            parse_mode: config.parse_mode.clone(),
            credentials,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.credentials.bot_token, method)
    }

    /// POST a form to a bot method and return the status and body text.
    ///
    /// Request URLs embed the bot token, so it is stripped from transport errors.
    async fn post_form(
        &self,
        method: &str,
        form: &[(&str, &str)],
    ) -> Result<(reqwest::StatusCode, String)> {
        let response = self
            .client
            .post(self.method_url(method))
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;
        Ok((status, body))
    }
}

/// Extract Telegram's error description from a response body, if present.
fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<UpdateResponse>(body)
        .ok()
        .and_then(|r| r.description)
        .map(|d| format!("unexpected status code {}: {}", status.as_u16(), d))
        .unwrap_or_else(|| format!("unexpected status code {}", status.as_u16()))
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<()> {
        log::debug!("Sending message to Telegram chat {}", self.credentials.chat_id);
        let (status, body) = self
            .post_form(
                "sendMessage",
                &[
                    ("chat_id", self.credentials.chat_id.as_str()),
                    ("text", text),
                    ("parse_mode", self.parse_mode.as_str()),
                ],
            )
            .await?;

        if !status.is_success() {
            return Err(AppError::messaging(format!(
                "sendMessage failed: {}",
                describe_failure(status, &body)
            )));
        }
        Ok(())
    }

    async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        let offset = offset.to_string();
        let (status, body) = self
            .post_form("getUpdates", &[("offset", offset.as_str())])
            .await?;

        if !status.is_success() {
            return Err(AppError::messaging(format!(
                "getUpdates failed: {}",
                describe_failure(status, &body)
            )));
        }

        parse_updates(&body)
    }
}

/// Decode a `getUpdates` body, treating `ok: false` as an error.
pub fn parse_updates(body: &str) -> Result<Vec<Update>> {
    let response: UpdateResponse = serde_json::from_str(body)?;
    if !response.ok {
        return Err(AppError::messaging(format!(
            "getUpdates returned ok=false: {}",
            response.description.as_deref().unwrap_or("no description")
        )));
    }
    Ok(response.result)
}
