//! Relay to the DeepSeek chat completions endpoint.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

const SYSTEM_PROMPT: &str = "You interpret commands for a smart contract on the Stacks blockchain. \
    ALWAYS reply with a JSON object with the keys 'action' (for example: 'increment', 'read', \
    'none') and 'message' (a short explanation).";

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("DEEPSEEK_API_KEY is not configured")]
    NotConfigured,
    #[error("request to chat API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON from chat API: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct DeepSeekClient {
    http: Client,
    url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl DeepSeekClient {
    pub fn new(config: &Config) -> Result<Self, ChatError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.deepseek_url.clone(),
            model: config.deepseek_model.clone(),
            api_key: config.deepseek_api_key.clone(),
        })
    }

    pub fn request_body(&self, user_message: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_message }
            ]
        })
    }

    /// Sends one user message and returns the raw completion response.
    ///
    /// The status code is not checked: error bodies are JSON too and end up
    /// as the reply text.
    pub async fn complete(&self, user_message: &str) -> Result<Value, ChatError> {
        let api_key = self.api_key.as_ref().ok_or(ChatError::NotConfigured)?;
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(api_key.expose_secret())
            .json(&self.request_body(user_message))
            .send()
            .await?;
        let status = resp.status();
        debug!(status = %status, "Chat API response status");
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
