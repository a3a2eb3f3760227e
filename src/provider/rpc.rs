use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::model::{ProviderError, Transaction};
use crate::provider::traits::ChainProvider;

/// Ethereum JSON-RPC 2.0 provider over HTTP.
pub struct HttpRpcProvider {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcBlock {
    transactions: Vec<Transaction>,
}

impl HttpRpcProvider {
    /// Builds a provider and probes the endpoint with a single
    /// `eth_blockNumber` call so an unreachable node fails before
    /// any scan starts.
    pub async fn connect(url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent("ChainSonar/0.1")
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let provider = Self {
            client,
            url: url.to_string(),
        };
        provider.current_block_height().await?;
        Ok(provider)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "http status {}",
                response.status()
            )));
        }

        let rpc: RpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(err) = rpc.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(rpc.result.unwrap_or(Value::Null))
    }
}

#[async_trait::async_trait]
impl ChainProvider for HttpRpcProvider {
    async fn current_block_height(&self) -> Result<u64, ProviderError> {
        let result = self.call("eth_blockNumber", json!([])).await?;
        parse_quantity(&result)
    }

    async fn block_transactions(&self, number: u64) -> Result<Vec<Transaction>, ProviderError> {
        let result = self
            .call("eth_getBlockByNumber", json!([to_quantity(number), true]))
            .await?;
        // Nodes answer null for blocks outside their retained history.
        if result.is_null() {
            return Err(ProviderError::BlockUnavailable(number));
        }
        let block: RpcBlock = serde_json::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("block {number}: {e}")))?;
        debug!(block = number, txs = block.transactions.len(), "fetched block");
        Ok(block.transactions)
    }
}

/// Parses a `0x`-prefixed hex quantity as used by the Ethereum JSON-RPC API.
fn parse_quantity(value: &Value) -> Result<u64, ProviderError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse(format!("expected hex quantity, got {value}")))?;
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16)
        .map_err(|e| ProviderError::InvalidResponse(format!("bad hex quantity `{raw}`: {e}")))
}

fn to_quantity(number: u64) -> String {
    format!("0x{number:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_round_trip() {
        assert_eq!(to_quantity(0), "0x0");
        assert_eq!(to_quantity(1_000_000), "0xf4240");
        assert_eq!(parse_quantity(&json!("0xf4240")).unwrap(), 1_000_000);
    }

    #[test]
    fn quantity_rejects_non_string() {
        assert!(parse_quantity(&json!(12)).is_err());
        assert!(parse_quantity(&json!(null)).is_err());
        assert!(parse_quantity(&json!("0xzz")).is_err());
    }

    #[test]
    fn block_payload_decodes_full_transactions() {
        let payload = json!({
            "number": "0x10",
            "hash": "0xabc0000000000000000000000000000000000000000000000000000000000000",
            "transactions": [
                {
                    "from": "0x1111111111111111111111111111111111111111",
                    "to": "0xdac17f958d2ee523a2206206994597c13d831ec7",
                    "value": "0x0",
                    "gas": "0x5208"
                },
                {
                    "from": "0x2222222222222222222222222222222222222222",
                    "to": null
                }
            ]
        });
        let block: RpcBlock = serde_json::from_value(payload).unwrap();
        assert_eq!(block.transactions.len(), 2);
        assert!(block.transactions[0].to.is_some());
        assert!(block.transactions[1].to.is_none());
    }

    #[test]
    fn error_object_decodes() {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "header not found" }
        });
        let rpc: RpcResponse = serde_json::from_value(payload).unwrap();
        let err = rpc.error.unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "header not found");
        assert!(rpc.result.is_none());
    }
}
