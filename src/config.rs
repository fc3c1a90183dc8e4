// src/config.rs

use std::env;

use anyhow::{Context, Result};
use secrecy::SecretString;
use url::Url;

pub const TESTNET_API_URL: &str = "https://api.testnet.hiro.so";
pub const MAINNET_API_URL: &str = "https://api.hiro.so";
pub const DEEPSEEK_CHAT_URL: &str = "https://api.deepseek.com/v1/chat/completions";

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub port: u16,

    // Contract settings
    /// Contract principal; also used as the sender of read-only calls.
    pub contract_address: String,
    pub contract_name: String,
    pub contract_function: String,
    pub stacks_network: String,
    pub stacks_api_url: String,

    // Chat assistant
    pub deepseek_api_key: Option<SecretString>,
    pub deepseek_url: String,
    pub deepseek_model: String,

    // Outbound HTTP
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            contract_address: String::new(),
            contract_name: String::new(),
            contract_function: "get-count".to_string(),
            stacks_network: "testnet".to_string(),
            stacks_api_url: TESTNET_API_URL.to_string(),
            deepseek_api_key: None,
            deepseek_url: DEEPSEEK_CHAT_URL.to_string(),
            deepseek_model: "deepseek-chat".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Hiro API base URL for a network name. Anything but `testnet` is mainnet.
pub fn stacks_api_for_network(network: &str) -> &'static str {
    if network == "testnet" {
        TESTNET_API_URL
    } else {
        MAINNET_API_URL
    }
}

fn parse_url(value: &str, var: &str) -> Result<String> {
    Url::parse(value).with_context(|| format!("{} must be a valid URL", var))?;
    Ok(value.trim_end_matches('/').to_string())
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        let stacks_network = env::var("STACKS_NETWORK").unwrap_or_else(|_| "testnet".to_string());
        let stacks_api_url = match env::var("STACKS_API_URL") {
            Ok(url) => parse_url(&url, "STACKS_API_URL")?,
            Err(_) => stacks_api_for_network(&stacks_network).to_string(),
        };
        let deepseek_url = match env::var("DEEPSEEK_URL") {
            Ok(url) => parse_url(&url, "DEEPSEEK_URL")?,
            Err(_) => DEEPSEEK_CHAT_URL.to_string(),
        };

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,

            contract_address: env::var("CONTRACT_ADDRESS")
                .context("CONTRACT_ADDRESS must be set")?,
            contract_name: env::var("CONTRACT_NAME").context("CONTRACT_NAME must be set")?,
            contract_function: env::var("CONTRACT_FUNCTION")
                .unwrap_or_else(|_| "get-count".to_string()),
            stacks_network,
            stacks_api_url,

            deepseek_api_key: env::var("DEEPSEEK_API_KEY").ok().map(SecretString::new),
            deepseek_url,
            deepseek_model: env::var("DEEPSEEK_MODEL")
                .unwrap_or_else(|_| "deepseek-chat".to_string()),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
        })
    }
}
