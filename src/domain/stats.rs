//! Aggregate statistics computed from store snapshots.
//!
//! Everything here is pure: callers pass in the pools and transactions they
//! read from the repositories and get a value object back.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::pool::{Pool, PoolStatus};
use super::transaction::{Transaction, TransactionStatus, TransactionType};

/// Currency reported when pools disagree on their contribution currency.
pub const MIXED_CURRENCY: &str = "MIXED";

/// Unit of [`HomeStats::claim_rate`].
pub const CLAIM_RATE_UNIT: &str = "percent";

/// Unit of [`HomeStats::average_payout_time`].
pub const PAYOUT_TIME_UNIT: &str = "seconds";

const WINDOW_SECS: i64 = 86_400;

/// Headline figures for the landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeStats {
    /// Total value locked across pools.
    pub tvl: f64,
    /// Currency of `tvl`.
    pub tvl_currency: String,
    /// Members across all pools.
    pub total_policies: u64,
    /// Confirmed payouts per claim, in percent.
    pub claim_rate: f64,
    /// Mean seconds from claim to payout.
    pub average_payout_time: i64,
}

impl HomeStats {
    /// Aggregates home statistics.
    ///
    /// `default_currency` is used when there are no pools.
    #[must_use]
    pub fn aggregate(pools: &[Pool], transactions: &[Transaction], default_currency: &str) -> Self {
        let tvl = pools.iter().map(Pool::pool_size).sum();
        let total_policies = pools.iter().map(|p| u64::from(p.members())).sum();
        let tvl_currency = shared_currency(pools.iter().map(|p| p.premium().currency.as_str()))
            .unwrap_or_else(|| default_currency.to_string());

        Self {
            tvl,
            tvl_currency,
            total_policies,
            claim_rate: claim_rate(transactions),
            average_payout_time: average_payout_time(transactions),
        }
    }
}

/// Network figures shown beside the live transaction feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkStats {
    /// Network display name.
    pub network: String,
    /// Highest block number seen.
    pub block_number: u64,
    /// Gas price as displayed.
    pub gas_price: String,
    /// Gas price unit.
    pub gas_unit: String,
}

/// Figures for the transaction dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionStats {
    /// Confirmed purchase and stake volume over the last 24 hours.
    pub total_volume_24h: f64,
    /// Currency of `total_volume_24h`.
    pub volume_currency: String,
    /// Members of pools that are not settling.
    pub active_policies: u64,
    /// Transactions per second over the last 24 hours.
    pub transactions_per_second: f64,
    /// Network figures.
    pub network_stats: NetworkStats,
}

/// Static network settings merged into [`TransactionStats`].
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    /// Network display name.
    pub network: String,
    /// Gas price as displayed.
    pub gas_price: String,
    /// Gas price unit.
    pub gas_unit: String,
    /// Currency used when no transaction falls in the window.
    pub default_currency: String,
}

impl TransactionStats {
    /// Aggregates transaction statistics for the 24 hours ending at `now`.
    #[must_use]
    pub fn aggregate(
        pools: &[Pool],
        transactions: &[Transaction],
        profile: &NetworkProfile,
        now: DateTime<Utc>,
    ) -> Self {
        let since = now - Duration::seconds(WINDOW_SECS);
        let in_window: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.timestamp() > since && tx.timestamp() <= now)
            .collect();

        let volume: Vec<&Transaction> = in_window
            .iter()
            .copied()
            .filter(|tx| {
                tx.status() == TransactionStatus::Confirmed
                    && matches!(
                        tx.tx_type(),
                        TransactionType::Purchase | TransactionType::Stake
                    )
            })
            .collect();

        let total_volume_24h = volume.iter().map(|tx| parse_amount(tx.amount())).sum();
        let volume_currency = shared_currency(volume.iter().map(|tx| tx.currency()))
            .unwrap_or_else(|| profile.default_currency.clone());

        let active_policies = pools
            .iter()
            .filter(|p| p.status() != PoolStatus::Settling)
            .map(|p| u64::from(p.members()))
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let transactions_per_second = in_window.len() as f64 / WINDOW_SECS as f64;

        let block_number = transactions
            .iter()
            .map(Transaction::block_number)
            .max()
            .unwrap_or(0);

        Self {
            total_volume_24h,
            volume_currency,
            active_policies,
            transactions_per_second,
            network_stats: NetworkStats {
                network: profile.network.clone(),
                block_number,
                gas_price: profile.gas_price.clone(),
                gas_unit: profile.gas_unit.clone(),
            },
        }
    }
}

/// Parses an on-chain amount string; unparsable or non-finite amounts count
/// as zero.
fn parse_amount(amount: &str) -> f64 {
    amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Returns the single currency shared by every item, [`MIXED_CURRENCY`] if
/// they differ, or `None` for an empty input.
fn shared_currency<'a>(mut currencies: impl Iterator<Item = &'a str>) -> Option<String> {
    let first = currencies.next()?;
    if currencies.all(|c| c == first) {
        Some(first.to_string())
    } else {
        Some(MIXED_CURRENCY.to_string())
    }
}

fn claim_rate(transactions: &[Transaction]) -> f64 {
    let claims = transactions
        .iter()
        .filter(|tx| tx.tx_type() == TransactionType::Claim)
        .count();
    if claims == 0 {
        return 0.0;
    }
    let payouts = transactions
        .iter()
        .filter(|tx| {
            tx.tx_type() == TransactionType::Payout && tx.status() == TransactionStatus::Confirmed
        })
        .count();
    #[allow(clippy::cast_precision_loss)]
    let rate = payouts as f64 / claims as f64 * 100.0;
    rate
}

/// Mean seconds between each payout and the latest claim on the same pool
/// that precedes it. Payouts without a pool or a prior claim are skipped.
fn average_payout_time(transactions: &[Transaction]) -> i64 {
    let mut claims: HashMap<&str, Vec<DateTime<Utc>>> = HashMap::new();
    for tx in transactions {
        if tx.tx_type() == TransactionType::Claim
            && let Some(pool_id) = tx.pool_id()
        {
            claims.entry(pool_id).or_default().push(tx.timestamp());
        }
    }

    let mut total: i64 = 0;
    let mut count: i64 = 0;
    for tx in transactions {
        if tx.tx_type() != TransactionType::Payout {
            continue;
        }
        let Some(pool_claims) = tx.pool_id().and_then(|id| claims.get(id)) else {
            continue;
        };
        let latest = pool_claims
            .iter()
            .filter(|at| **at <= tx.timestamp())
            .max();
        if let Some(claimed_at) = latest {
            total = total.saturating_add((tx.timestamp() - *claimed_at).num_seconds());
            count += 1;
        }
    }

    if count == 0 { 0 } else { total / count }
}
