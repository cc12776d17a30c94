//! Block-explorer REST collaborator (Etherscan-compatible API).

use alloy::primitives::{Address, TxHash};
use serde::Deserialize;

use crate::error::ValuationError;

pub const DEFAULT_API_URL: &str = "https://api.etherscan.io/api";

/// Read-only client for the explorer endpoints the tools need: block lookup
/// by timestamp and internal-transaction history.
#[derive(Clone, Debug)]
pub struct Explorer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Explorer envelope; `result` is a string for some actions and a list for
/// others, and on failure it degrades to a human-readable message.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    result: serde_json::Value,
}

/// Internal transaction as reported by `txlistinternal`.
#[derive(Clone, Debug, Deserialize)]
struct InternalTx {
    hash: TxHash,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "isError")]
    is_error: String,
}

impl Explorer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), api_url: api_url.into(), api_key: api_key.into() }
    }

    async fn get(&self, query: &str) -> Result<ApiResponse, ValuationError> {
        let url = format!("{}?{}&apikey={}", self.api_url, query, self.api_key);
        Ok(self.http.get(&url).send().await?.json().await?)
    }

    /// Number of the latest block at or before the given UNIX timestamp.
    pub async fn block_by_time(&self, timestamp: u64) -> Result<u64, ValuationError> {
        let response = self
            .get(&format!(
                "module=block&action=getblocknobytime&closest=before&timestamp={timestamp}"
            ))
            .await?;
        let number: String = serde_json::from_value(response.result)?;
        number.parse().map_err(|_| {
            ValuationError::MalformedResponse(format!("block number for timestamp: {number}"))
        })
    }

    /// Hash of the transaction that deployed the contract, if the explorer
    /// records a successful internal `create` for the address.
    pub async fn creation_tx(&self, address: Address) -> Result<Option<TxHash>, ValuationError> {
        let response = self
            .get(&format!("module=account&action=txlistinternal&address={address}&sort=asc"))
            .await?;
        if response.status == "0" {
            // No internal transactions known for the address
            return Ok(None);
        }
        let txs: Vec<InternalTx> = serde_json::from_value(response.result)?;
        Ok(txs
            .first()
            .filter(|tx| tx.kind == "create" && tx.is_error == "0")
            .map(|tx| tx.hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_tx_parsing() {
        let raw = r#"{
            "status": "1",
            "result": [
                { "hash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
                  "type": "create", "isError": "0" }
            ]
        }"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        let txs: Vec<InternalTx> = serde_json::from_value(response.result).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].kind, "create");
        assert_eq!(txs[0].is_error, "0");
    }

    #[test]
    fn test_error_envelope() {
        // On status 0 the result is a bare message, not a list
        let raw = r#"{ "status": "0", "result": "No transactions found" }"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.status, "0");
        assert!(serde_json::from_value::<Vec<InternalTx>>(response.result).is_err());
    }
}
