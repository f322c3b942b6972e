//! Blockchain explorer collaborator.
//!
//! [`BlockExplorer`] is the read-only port the episode use cases depend on.
//! [`etherscan::EtherscanClient`] implements it over the Etherscan v2 HTTP
//! API; tests substitute in-process fakes.

pub mod etherscan;
pub mod timestamp;
pub mod topics;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExternalServiceError;

/// Result alias for explorer calls.
pub type ExplorerResult<T> = Result<T, ExternalServiceError>;

/// Ordering of internal transactions by block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message call between contracts, as reported by the explorer.
///
/// Numeric fields stay as the strings the explorer returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternalTransaction {
    /// Block number (decimal string).
    pub block_number: String,
    /// Unix seconds (decimal string).
    pub time_stamp: String,
    /// Parent transaction hash.
    pub hash: String,
    /// Caller.
    pub from: String,
    /// Callee; empty for contract creations.
    pub to: String,
    /// Transferred wei.
    pub value: String,
    /// Address of the created contract, if this call deployed one.
    pub contract_address: String,
    /// Call data.
    pub input: String,
    /// Call kind (`call`, `create`, ...).
    #[serde(rename = "type")]
    pub call_type: String,
    /// Gas limit.
    pub gas: String,
    /// Gas used.
    pub gas_used: String,
    /// Trace position.
    pub trace_id: String,
    /// `"1"` when the call reverted.
    pub is_error: String,
    /// Revert reason, if any.
    pub err_code: String,
}

/// A contract event log, as reported by the explorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventLog {
    /// Emitting contract.
    pub address: String,
    /// Indexed topics; the first is the event signature hash.
    pub topics: Vec<String>,
    /// Non-indexed payload (hex).
    pub data: String,
    /// Block number (hex or decimal string).
    pub block_number: String,
    /// Block hash.
    pub block_hash: String,
    /// Unix seconds (hex or decimal string).
    pub time_stamp: String,
    /// Gas price.
    pub gas_price: String,
    /// Gas used.
    pub gas_used: String,
    /// Position within the block.
    pub log_index: String,
    /// Emitting transaction hash.
    pub transaction_hash: String,
    /// Transaction position within the block.
    pub transaction_index: String,
}

/// Read-only queries against a blockchain explorer.
///
/// Implementations must not retry: the first failure is returned.
#[async_trait]
pub trait BlockExplorer: Send + Sync {
    /// Internal transactions touching `address`.
    async fn internal_transactions(
        &self,
        address: &str,
        sort: SortOrder,
    ) -> ExplorerResult<Vec<InternalTransaction>>;

    /// Event logs emitted by `address`.
    async fn event_logs(&self, address: &str) -> ExplorerResult<Vec<EventLog>>;
}
