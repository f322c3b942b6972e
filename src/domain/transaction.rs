//! On-chain transaction record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::UnknownVariant;
use super::entity_store::Entity;

/// What the transaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Premium paid to join an episode.
    Purchase,
    /// Member claimed a payout.
    Claim,
    /// Payout sent to a member.
    Payout,
    /// Capital staked into a pool.
    Stake,
}

impl TransactionType {
    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Claim => "claim",
            Self::Payout => "payout",
            Self::Stake => "stake",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "claim" => Ok(Self::Claim),
            "payout" => Ok(Self::Payout),
            "stake" => Ok(Self::Stake),
            other => Err(UnknownVariant::new("transaction type", other)),
        }
    }
}

/// Confirmation state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Submitted, not yet mined.
    Pending,
    /// Mined successfully.
    Confirmed,
    /// Reverted or dropped.
    Failed,
}

/// Required fields for creating a [`Transaction`].
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    /// Transaction identifier.
    pub id: String,
    /// What the transaction did.
    pub tx_type: TransactionType,
    /// On-chain hash.
    pub hash: String,
    /// Sender address.
    pub address: String,
    /// Amount exactly as formatted on-chain (e.g. `"0.0125"`).
    pub amount: String,
    /// Currency code.
    pub currency: String,
    /// Block timestamp.
    pub timestamp: DateTime<Utc>,
    /// Block number.
    pub block_number: u64,
    /// Initial status.
    pub status: TransactionStatus,
}

/// A transaction touching an episode or pool.
///
/// Immutable after creation apart from its status and the three optional
/// correlation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: String,
    tx_type: TransactionType,
    hash: String,
    address: String,
    amount: String,
    currency: String,
    flight: Option<String>,
    event_id: Option<String>,
    pool_id: Option<String>,
    timestamp: DateTime<Utc>,
    block_number: u64,
    status: TransactionStatus,
}

impl Transaction {
    /// Creates a transaction with no correlation fields set.
    #[must_use]
    pub fn new(draft: TransactionDraft) -> Self {
        Self {
            id: draft.id,
            tx_type: draft.tx_type,
            hash: draft.hash,
            address: draft.address,
            amount: draft.amount,
            currency: draft.currency,
            flight: None,
            event_id: None,
            pool_id: None,
            timestamp: draft.timestamp,
            block_number: draft.block_number,
            status: draft.status,
        }
    }

    /// Transaction identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// What the transaction did.
    #[must_use]
    pub const fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    /// On-chain hash.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Sender address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Amount string as formatted on-chain.
    #[must_use]
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Flight number, when the transaction concerns one.
    #[must_use]
    pub fn flight(&self) -> Option<&str> {
        self.flight.as_deref()
    }

    /// Related episode id.
    #[must_use]
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    /// Related pool id.
    #[must_use]
    pub fn pool_id(&self) -> Option<&str> {
        self.pool_id.as_deref()
    }

    /// Block timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Block number.
    #[must_use]
    pub const fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Confirmation status.
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Sets the flight number.
    pub fn set_flight(&mut self, flight: impl Into<String>) {
        self.flight = Some(flight.into());
    }

    /// Sets the related episode id.
    pub fn set_event_id(&mut self, event_id: impl Into<String>) {
        self.event_id = Some(event_id.into());
    }

    /// Sets the related pool id.
    pub fn set_pool_id(&mut self, pool_id: impl Into<String>) {
        self.pool_id = Some(pool_id.into());
    }

    /// Updates the confirmation status.
    pub fn update_status(&mut self, status: TransactionStatus) {
        self.status = status;
    }
}

impl Entity for Transaction {
    const KIND: &'static str = "transaction";

    fn id(&self) -> &str {
        &self.id
    }
}
