//! Etherscan v2 API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{BlockExplorer, EventLog, ExplorerResult, InternalTransaction, SortOrder};
use crate::error::ExternalServiceError;

const SERVICE: &str = "etherscan";

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.etherscan.io/v2/api";

/// Largest page the explorer serves for account queries.
pub const MAX_PAGE_SIZE: &str = "10000";

/// Default chain (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: &str = "1";

/// Connection settings for [`EtherscanClient`].
#[derive(Debug, Clone)]
pub struct EtherscanSettings {
    /// API key sent as `apikey`.
    pub api_key: String,
    /// Chain id sent as `chainid`.
    pub chain_id: String,
    /// Endpoint URL.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Response envelope shared by every Etherscan endpoint.
///
/// On failure `result` is a string, so it is decoded only after `status`
/// has been checked.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: String,
    #[serde(default)]
    result: serde_json::Value,
}

/// [`BlockExplorer`] backed by the Etherscan HTTP API.
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    chain_id: String,
}

impl EtherscanClient {
    /// Builds a client from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ExternalServiceError::Decode`] if the base URL is invalid
    /// and [`ExternalServiceError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(settings: EtherscanSettings) -> Result<Self, ExternalServiceError> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| ExternalServiceError::Decode {
            service: SERVICE,
            reason: format!("invalid base url {}: {e}", settings.base_url),
        })?;
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|source| ExternalServiceError::Transport {
                service: SERVICE,
                source,
            })?;
        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key,
            chain_id: settings.chain_id,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        module: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> ExplorerResult<Vec<T>> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("chainid", &self.chain_id)
            .append_pair("module", module)
            .append_pair("action", action)
            .extend_pairs(params.iter().copied());

        tracing::debug!(module, action, "etherscan request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ExternalServiceError::Transport {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ExternalServiceError::Transport {
                service: SERVICE,
                source,
            })?;
        if !status.is_success() {
            return Err(ExternalServiceError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| ExternalServiceError::Decode {
                service: SERVICE,
                reason: e.to_string(),
            })?;

        if envelope.status != "1" {
            if is_empty_result(&envelope) {
                return Ok(Vec::new());
            }
            let detail = envelope.result.as_str().unwrap_or_default();
            let message = if detail.is_empty() {
                envelope.message
            } else {
                format!("{}: {detail}", envelope.message)
            };
            return Err(ExternalServiceError::Remote {
                service: SERVICE,
                message,
            });
        }

        serde_json::from_value(envelope.result).map_err(|e| ExternalServiceError::Decode {
            service: SERVICE,
            reason: e.to_string(),
        })
    }
}

/// Etherscan reports "nothing found" as a failed call with an empty array.
fn is_empty_result(envelope: &Envelope) -> bool {
    envelope.message.starts_with("No ")
        && envelope
            .result
            .as_array()
            .is_some_and(|items| items.is_empty())
}

#[async_trait]
impl BlockExplorer for EtherscanClient {
    async fn internal_transactions(
        &self,
        address: &str,
        sort: SortOrder,
    ) -> ExplorerResult<Vec<InternalTransaction>> {
        self.call(
            "account",
            "txlistinternal",
            &[
                ("address", address),
                ("startblock", "0"),
                ("endblock", "9999999999"),
                ("page", "1"),
                ("offset", MAX_PAGE_SIZE),
                ("sort", sort.as_str()),
            ],
        )
        .await
    }

    async fn event_logs(&self, address: &str) -> ExplorerResult<Vec<EventLog>> {
        self.call(
            "logs",
            "getLogs",
            &[
                ("address", address),
                ("fromBlock", "0"),
                ("toBlock", "latest"),
                ("page", "1"),
                ("offset", "1000"),
            ],
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> EtherscanSettings {
        EtherscanSettings {
            api_key: "key".to_string(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = EtherscanClient::new(settings("not a url"));
        assert!(matches!(
            result,
            Err(ExternalServiceError::Decode {
                service: "etherscan",
                ..
            })
        ));
    }

    #[test]
    fn no_records_is_empty_result() {
        let Ok(envelope) = serde_json::from_str::<Envelope>(
            r#"{"status":"0","message":"No transactions found","result":[]}"#,
        ) else {
            panic!("envelope should decode");
        };
        assert!(is_empty_result(&envelope));
    }

    #[test]
    fn error_string_result_is_not_empty() {
        let Ok(envelope) = serde_json::from_str::<Envelope>(
            r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#,
        ) else {
            panic!("envelope should decode");
        };
        assert!(!is_empty_result(&envelope));
    }
}
