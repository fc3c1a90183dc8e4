// src/blockchain/services/contract.rs

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::blockchain::models::ClientError;

/// Body of a Stacks `call-read` request.
#[derive(Debug, Serialize)]
pub struct ReadOnlyCall<'a> {
    pub sender: &'a str,
    /// Hex-serialized Clarity arguments.
    pub arguments: &'a [String],
}

pub fn call_read_url(api_base: &str, address: &str, name: &str, function: &str) -> String {
    format!(
        "{}/v2/contracts/call-read/{}/{}/{}",
        api_base.trim_end_matches('/'),
        address,
        name,
        function
    )
}

/// Invokes a read-only contract function and returns the API's JSON body.
///
/// Non-2xx statuses and bodies that are not JSON are errors. A JSON body
/// missing `result` is returned as-is; the decoder deals with it.
pub async fn call_read_only(
    client: &Client,
    api_base: &str,
    address: &str,
    name: &str,
    function: &str,
    arguments: &[String],
) -> Result<Value, ClientError> {
    let url = call_read_url(api_base, address, name, function);
    let payload = ReadOnlyCall {
        sender: address,
        arguments,
    };
    debug!(url = %url, args = arguments.len(), "Calling read-only contract function");

    let res = client.post(&url).json(&payload).send().await?;
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(ClientError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    let data: Value = serde_json::from_str(&body)?;
    debug!(response = %data, "Read-only call response");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_read_url_joins_segments() {
        assert_eq!(
            call_read_url("https://api.testnet.hiro.so/", "ST1ABC", "counter", "get-count"),
            "https://api.testnet.hiro.so/v2/contracts/call-read/ST1ABC/counter/get-count"
        );
    }

    #[test]
    fn payload_uses_address_as_sender() {
        let args: Vec<String> = Vec::new();
        let body = serde_json::to_value(ReadOnlyCall {
            sender: "ST1ABC",
            arguments: &args,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"sender": "ST1ABC", "arguments": []}));
    }
}
