//! Transaction DTOs: the paginated feed and dashboard statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    NetworkStats, Transaction, TransactionStats, TransactionStatus, TransactionType,
};

/// Query for `GET /api/transactions`.
///
/// Values are kept as sent. Invalid `limit`/`offset` fall back to their
/// defaults; an unknown `type` matches nothing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    /// Transaction type (`purchase`, `claim`, `payout`, `stake`).
    #[serde(default, rename = "type")]
    pub tx_type: Option<String>,
    /// Related episode id.
    #[serde(default)]
    pub event_id: Option<String>,
    /// Related pool id.
    #[serde(default)]
    pub pool_id: Option<String>,
    /// Page size, 1..=100 (default 20).
    #[serde(default)]
    pub limit: Option<String>,
    /// Items to skip, >= 0 (default 0).
    #[serde(default)]
    pub offset: Option<String>,
}

/// Transaction projection.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    /// Transaction identifier.
    pub id: String,
    /// What the transaction did.
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// On-chain hash.
    pub hash: String,
    /// Sender address.
    pub address: String,
    /// Amount as formatted on-chain.
    pub amount: String,
    /// Currency code.
    pub currency: String,
    /// Flight number, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight: Option<String>,
    /// Related episode id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Related pool id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    /// Block timestamp.
    pub timestamp: DateTime<Utc>,
    /// Block number.
    pub block_number: u64,
    /// Confirmation status.
    pub status: TransactionStatus,
}

impl From<&Transaction> for TransactionDto {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id().to_string(),
            tx_type: t.tx_type(),
            hash: t.hash().to_string(),
            address: t.address().to_string(),
            amount: t.amount().to_string(),
            currency: t.currency().to_string(),
            flight: t.flight().map(str::to_string),
            event_id: t.event_id().map(str::to_string),
            pool_id: t.pool_id().map(str::to_string),
            timestamp: t.timestamp(),
            block_number: t.block_number(),
            status: t.status(),
        }
    }
}

/// Response for `GET /api/transactions`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionsResponse {
    /// The requested page.
    pub transactions: Vec<TransactionDto>,
    /// Matching transactions before paging.
    pub total: usize,
    /// Effective page size.
    pub limit: usize,
    /// Effective offset.
    pub offset: usize,
}

/// Network figures.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatsDto {
    /// Network display name.
    pub network: String,
    /// Highest block number seen.
    pub block_number: u64,
    /// Gas price as displayed.
    pub gas_price: String,
    /// Gas price unit.
    pub gas_unit: String,
}

impl From<NetworkStats> for NetworkStatsDto {
    fn from(n: NetworkStats) -> Self {
        Self {
            network: n.network,
            block_number: n.block_number,
            gas_price: n.gas_price,
            gas_unit: n.gas_unit,
        }
    }
}

/// Response for `GET /api/transactions/stats`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatsDto {
    /// Confirmed purchase and stake volume, last 24h.
    pub total_volume_24h: f64,
    /// Currency of the volume.
    pub volume_currency: String,
    /// Members of pools that are not settling.
    pub active_policies: u64,
    /// Transactions per second, last 24h.
    pub transactions_per_second: f64,
    /// Network figures.
    pub network_stats: NetworkStatsDto,
}

impl From<TransactionStats> for TransactionStatsDto {
    fn from(s: TransactionStats) -> Self {
        Self {
            total_volume_24h: s.total_volume_24h,
            volume_currency: s.volume_currency,
            active_policies: s.active_policies,
            transactions_per_second: s.transactions_per_second,
            network_stats: s.network_stats.into(),
        }
    }
}
