//! In-memory store of on-chain transactions.

use std::cmp::Ordering;

use crate::domain::{EntityStore, Transaction, TransactionType};
use crate::error::GatewayError;

/// Keyed store of [`Transaction`]s.
///
/// Every `find_*` method returns the newest transaction first; equal
/// timestamps are ordered by id.
#[derive(Debug, Default)]
pub struct TransactionRepository {
    store: EntityStore<Transaction>,
}

impl TransactionRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up one transaction.
    pub async fn find_by_id(&self, id: &str) -> Option<Transaction> {
        self.store.find_by_id(id).await
    }

    /// Returns every transaction.
    pub async fn find_all(&self) -> Vec<Transaction> {
        newest_first(self.store.find_all().await)
    }

    /// Returns transactions of `tx_type`.
    pub async fn find_by_type(&self, tx_type: TransactionType) -> Vec<Transaction> {
        newest_first(self.store.filter(|t| t.tx_type() == tx_type).await)
    }

    /// Returns transactions tagged with episode `event_id`.
    pub async fn find_by_event_id(&self, event_id: &str) -> Vec<Transaction> {
        newest_first(self.store.filter(|t| t.event_id() == Some(event_id)).await)
    }

    /// Returns transactions tagged with pool `pool_id`.
    pub async fn find_by_pool_id(&self, pool_id: &str) -> Vec<Transaction> {
        newest_first(self.store.filter(|t| t.pool_id() == Some(pool_id)).await)
    }

    /// Inserts or replaces a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the id is empty.
    pub async fn save(&self, transaction: Transaction) -> Result<(), GatewayError> {
        self.store.save(transaction).await
    }

    /// Bulk-loads transactions at startup.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if any id is empty; nothing is
    /// loaded in that case.
    pub async fn initialize(&self, transactions: Vec<Transaction>) -> Result<(), GatewayError> {
        self.store.initialize(transactions, |_, _| Ok(())).await
    }
}

fn newest_first(mut items: Vec<Transaction>) -> Vec<Transaction> {
    items.sort_by(|a, b| match b.timestamp().cmp(&a.timestamp()) {
        Ordering::Equal => a.id().cmp(b.id()),
        other => other,
    });
    items
}
