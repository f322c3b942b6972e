//! Landing-page statistics.

use std::sync::Arc;

use crate::api::dto::HomeStatsDto;
use crate::domain::HomeStats;
use crate::repository::{PoolRepository, TransactionRepository};

/// Computes [`HomeStats`] from the live stores on every call.
#[derive(Debug, Clone)]
pub struct StatsService {
    pools: Arc<PoolRepository>,
    transactions: Arc<TransactionRepository>,
    default_currency: String,
}

impl StatsService {
    /// Creates a new `StatsService`. `default_currency` is reported when
    /// there are no pools.
    #[must_use]
    pub fn new(
        pools: Arc<PoolRepository>,
        transactions: Arc<TransactionRepository>,
        default_currency: impl Into<String>,
    ) -> Self {
        Self {
            pools,
            transactions,
            default_currency: default_currency.into(),
        }
    }

    /// Returns the home statistics.
    pub async fn get_home_stats(&self) -> HomeStatsDto {
        let pools = self.pools.find_all().await;
        let transactions = self.transactions.find_all().await;
        HomeStats::aggregate(&pools, &transactions, &self.default_currency).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::tests::draft;
    use crate::domain::{Pool, PoolStatus};

    #[tokio::test]
    async fn empty_stores_use_defaults() {
        let svc = StatsService::new(
            Arc::new(PoolRepository::new()),
            Arc::new(TransactionRepository::new()),
            "USD",
        );
        let stats = svc.get_home_stats().await;
        assert_eq!(stats.tvl_currency, "USD");
        assert_eq!(stats.total_policies, 0);
        assert_eq!(stats.claim_rate_unit, "percent");
        assert_eq!(stats.payout_time_unit, "seconds");
    }

    #[tokio::test]
    async fn reflects_new_members() {
        let pools = Arc::new(PoolRepository::new());
        let _ = pools
            .save(Pool::new(draft("1", "ke902", PoolStatus::Recruiting)))
            .await;
        let svc = StatsService::new(
            Arc::clone(&pools),
            Arc::new(TransactionRepository::new()),
            "USD",
        );
        assert_eq!(svc.get_home_stats().await.total_policies, 0);

        let _ = pools.add_member("1", 15_000.0).await;
        let stats = svc.get_home_stats().await;
        assert_eq!(stats.total_policies, 1);
        assert!((stats.tvl - 15_000.0).abs() < f64::EPSILON);
        assert_eq!(stats.tvl_currency, "KRW");
    }
}
