// src/lib.rs

pub mod api;
pub mod assistant;
pub mod blockchain;
pub mod config;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Read-only client for the configured Stacks contract
    pub stacks_client: blockchain::client::StacksClient,
    /// Chat model relay
    pub chat_client: assistant::DeepSeekClient,
}

impl AppState {
    pub fn new(config: config::Config) -> anyhow::Result<Self> {
        let stacks_client = blockchain::client::StacksClient::new(&config)?;
        let chat_client = assistant::DeepSeekClient::new(&config)?;
        Ok(Self {
            config,
            stacks_client,
            chat_client,
        })
    }
}
