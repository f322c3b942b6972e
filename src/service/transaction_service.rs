//! Transaction use cases: the paginated feed and its statistics.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::pagination::{page, parse_limit, parse_offset};
use crate::api::dto::{TransactionDto, TransactionQuery, TransactionStatsDto, TransactionsResponse};
use crate::domain::{NetworkProfile, Transaction, TransactionStats, TransactionType};
use crate::repository::{PoolRepository, TransactionRepository};

/// Read-side orchestration for transactions.
#[derive(Debug, Clone)]
pub struct TransactionService {
    transactions: Arc<TransactionRepository>,
    pools: Arc<PoolRepository>,
    network: NetworkProfile,
}

impl TransactionService {
    /// Creates a new `TransactionService`.
    #[must_use]
    pub fn new(
        transactions: Arc<TransactionRepository>,
        pools: Arc<PoolRepository>,
        network: NetworkProfile,
    ) -> Self {
        Self {
            transactions,
            pools,
            network,
        }
    }

    /// Returns one page of the newest-first transaction feed.
    ///
    /// `total` counts every transaction matching the filters, before
    /// paging.
    pub async fn get_transactions(&self, query: &TransactionQuery) -> TransactionsResponse {
        let limit = parse_limit(query.limit.as_deref());
        let offset = parse_offset(query.offset.as_deref());
        let matching = self.filter(query).await;

        TransactionsResponse {
            transactions: page(&matching, offset, limit)
                .iter()
                .map(TransactionDto::from)
                .collect(),
            total: matching.len(),
            limit,
            offset,
        }
    }

    async fn filter(&self, query: &TransactionQuery) -> Vec<Transaction> {
        let tx_type = match query.tx_type.as_deref().map(str::parse::<TransactionType>) {
            Some(Ok(tx_type)) => Some(tx_type),
            Some(Err(_)) => return Vec::new(),
            None => None,
        };
        let event_id = query.event_id.as_deref();
        let pool_id = query.pool_id.as_deref();

        // The first filter present picks the finder; the rest narrow it.
        let mut items = match (event_id, pool_id, tx_type) {
            (Some(event_id), _, _) => self.transactions.find_by_event_id(event_id).await,
            (None, Some(pool_id), _) => self.transactions.find_by_pool_id(pool_id).await,
            (None, None, Some(tx_type)) => self.transactions.find_by_type(tx_type).await,
            (None, None, None) => self.transactions.find_all().await,
        };
        if let Some(pool_id) = pool_id {
            items.retain(|t| t.pool_id() == Some(pool_id));
        }
        if let Some(tx_type) = tx_type {
            items.retain(|t| t.tx_type() == tx_type);
        }
        items
    }

    /// Aggregates dashboard statistics for the 24 hours ending at `now`.
    pub async fn get_transaction_stats(&self, now: DateTime<Utc>) -> TransactionStatsDto {
        let pools = self.pools.find_all().await;
        let transactions = self.transactions.find_all().await;
        TransactionStats::aggregate(&pools, &transactions, &self.network, now).into()
    }
}
