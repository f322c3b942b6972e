//! In-memory store of funding pools.
//!
//! Enforces one pool per episode: a pool whose `event_id` is already owned
//! by a pool with a different id is rejected on `save` and `initialize`.

use std::collections::HashMap;

use crate::domain::{Category, EntityStore, Pool, PoolStatus};
use crate::error::GatewayError;

/// Keyed store of [`Pool`]s.
#[derive(Debug, Default)]
pub struct PoolRepository {
    store: EntityStore<Pool>,
}

impl PoolRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up one pool.
    pub async fn find_by_id(&self, id: &str) -> Option<Pool> {
        self.store.find_by_id(id).await
    }

    /// Returns every pool.
    pub async fn find_all(&self) -> Vec<Pool> {
        self.store.find_all().await
    }

    /// Returns pools in `status`.
    pub async fn find_by_status(&self, status: PoolStatus) -> Vec<Pool> {
        self.store.filter(|p| p.status() == status).await
    }

    /// Returns pools in `category`.
    pub async fn find_by_category(&self, category: Category) -> Vec<Pool> {
        self.store.filter(|p| p.category() == category).await
    }

    /// Returns pools matching both `status` and `category`.
    pub async fn find_by_status_and_category(
        &self,
        status: PoolStatus,
        category: Category,
    ) -> Vec<Pool> {
        self.store
            .filter(|p| p.status() == status && p.category() == category)
            .await
    }

    /// Returns the pool funding `event_id`, if any.
    pub async fn find_by_event_id(&self, event_id: &str) -> Option<Pool> {
        self.store.find_first(|p| p.event_id() == event_id).await
    }

    /// Inserts or replaces a pool.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the id is empty or another
    /// pool already funds the same episode.
    pub async fn save(&self, pool: Pool) -> Result<(), GatewayError> {
        self.store.save_checked(pool, ensure_single_pool).await
    }

    /// Bulk-loads pools at startup. Nothing is loaded if any pool fails
    /// validation.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PoolRepository::save`].
    pub async fn initialize(&self, pools: Vec<Pool>) -> Result<(), GatewayError> {
        self.store.initialize(pools, ensure_single_pool).await
    }

    /// Records a member joining pool `id` with `contribution`.
    ///
    /// The member count and pool size change together under the store's
    /// write lock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for a negative or non-finite
    /// contribution and [`GatewayError::NotFound`] for an unknown pool.
    pub async fn add_member(&self, id: &str, contribution: f64) -> Result<Pool, GatewayError> {
        if !contribution.is_finite() || contribution < 0.0 {
            return Err(GatewayError::Validation(format!(
                "contribution must be a non-negative amount, got {contribution}"
            )));
        }
        self.store.update(id, |p| p.add_member(contribution)).await
    }

    /// Moves pool `id` to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for an unknown pool.
    pub async fn update_status(&self, id: &str, status: PoolStatus) -> Result<Pool, GatewayError> {
        self.store.update(id, |p| p.update_status(status)).await
    }
}

fn ensure_single_pool(existing: &HashMap<String, Pool>, pool: &Pool) -> Result<(), GatewayError> {
    let clash = existing
        .values()
        .find(|other| other.event_id() == pool.event_id() && other.id() != pool.id());
    match clash {
        Some(other) => Err(GatewayError::Validation(format!(
            "episode {} is already funded by pool {}",
            pool.event_id(),
            other.id()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::pool::tests::draft;

    #[tokio::test]
    async fn find_by_event_id_returns_owner() {
        let repo = PoolRepository::new();
        let _ = repo
            .initialize(vec![
                Pool::new(draft("1", "ke902", PoolStatus::Recruiting)),
                Pool::new(draft("2", "jejuTyphoon", PoolStatus::Recruiting)),
            ])
            .await;

        assert_eq!(
            repo.find_by_event_id("jejuTyphoon").await.map(|p| p.id().to_string()),
            Some("2".to_string())
        );
        assert!(repo.find_by_event_id("unknown").await.is_none());
    }

    #[tokio::test]
    async fn second_pool_for_same_episode_is_rejected() {
        let repo = PoolRepository::new();
        let _ = repo
            .save(Pool::new(draft("1", "ke902", PoolStatus::Recruiting)))
            .await;
        let result = repo
            .save(Pool::new(draft("9", "ke902", PoolStatus::Active)))
            .await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));

        // Re-saving the owner is an upsert.
        let resave = repo
            .save(Pool::new(draft("1", "ke902", PoolStatus::Active)))
            .await;
        assert!(resave.is_ok());
        assert_eq!(repo.find_all().await.len(), 1);
    }

    #[tokio::test]
    async fn initialize_rejects_duplicate_episode() {
        let repo = PoolRepository::new();
        let result = repo
            .initialize(vec![
                Pool::new(draft("1", "ke902", PoolStatus::Recruiting)),
                Pool::new(draft("2", "ke902", PoolStatus::Recruiting)),
            ])
            .await;
        assert!(result.is_err());
        assert!(repo.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn add_member_rejects_negative_contribution() {
        let repo = PoolRepository::new();
        let _ = repo
            .save(Pool::new(draft("1", "ke902", PoolStatus::Recruiting)))
            .await;
        assert!(matches!(
            repo.add_member("1", -5.0).await,
            Err(GatewayError::Validation(_))
        ));
        assert!(matches!(
            repo.add_member("1", f64::NAN).await,
            Err(GatewayError::Validation(_))
        ));
        assert!(matches!(
            repo.add_member("missing", 5.0).await,
            Err(GatewayError::NotFound { .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_add_member_is_additive() {
        let repo = Arc::new(PoolRepository::new());
        let _ = repo
            .save(Pool::new(draft("1", "ke902", PoolStatus::Recruiting)))
            .await;

        let mut handles = Vec::new();
        for i in 0..64_u32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.add_member("1", f64::from(i % 4 + 1) * 250.0).await
            }));
        }
        for handle in handles {
            let Ok(Ok(_)) = handle.await else {
                panic!("add_member task failed");
            };
        }

        let expected: f64 = (0..64_u32).map(|i| f64::from(i % 4 + 1) * 250.0).sum();
        let Some(pool) = repo.find_by_id("1").await else {
            panic!("pool missing");
        };
        assert_eq!(pool.members(), 64);
        assert!((pool.pool_size() - expected).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn status_and_category_filters() {
        let repo = PoolRepository::new();
        let _ = repo
            .initialize(vec![
                Pool::new(draft("1", "ke902", PoolStatus::Recruiting)),
                Pool::new(draft("3", "gimpoJeju", PoolStatus::Active)),
            ])
            .await;
        assert_eq!(repo.find_by_status(PoolStatus::Active).await.len(), 1);
        assert_eq!(repo.find_by_category(Category::FlightDelay).await.len(), 2);
        assert!(
            repo.find_by_status_and_category(PoolStatus::Settling, Category::FlightDelay)
                .await
                .is_empty()
        );
    }
}
