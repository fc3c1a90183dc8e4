//! Client for read-only calls against the Stacks blockchain API.
//!
//! Wraps the HTTP plumbing in `services::contract` and runs every result
//! through the Clarity decoder.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::blockchain::{
    clarity,
    models::{ClientError, DecodeOutcome},
    services::contract,
};
use crate::config::Config;

/// Identifies the deployed contract being queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractId {
    pub address: String,
    pub name: String,
}

#[derive(Clone)]
pub struct StacksClient {
    http: Client,
    api_base: String,
    contract: ContractId,
    function: String,
}

impl StacksClient {
    /// Create a client for the configured contract and network.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: config.stacks_api_url.clone(),
            contract: ContractId {
                address: config.contract_address.clone(),
                name: config.contract_name.clone(),
            },
            function: config.contract_function.clone(),
        })
    }

    /// Raw JSON response of the configured read-only function.
    pub async fn call_read_only(&self, arguments: &[String]) -> Result<Value, ClientError> {
        contract::call_read_only(
            &self.http,
            &self.api_base,
            &self.contract.address,
            &self.contract.name,
            &self.function,
            arguments,
        )
        .await
    }

    /// Read the counter and decode it.
    ///
    /// A response with no `result` field decodes as unparseable rather than
    /// failing.
    pub async fn read_count(&self) -> Result<DecodeOutcome, ClientError> {
        let data = self.call_read_only(&[]).await?;
        let raw = data.get("result").cloned().unwrap_or(Value::Null);
        debug!(raw = %raw, "Raw contract result");

        let outcome = clarity::decode(&raw);
        if outcome.is_suspect() {
            warn!(
                contract = %self.contract.name,
                function = %self.function,
                encoding = %outcome.encoding,
                raw = %raw,
                "Contract result could not be decoded exactly"
            );
        }
        Ok(outcome)
    }
}
