//! In-memory store of insurance episodes.

use crate::domain::{Category, EntityStore, EpisodeStatus, InsuranceEpisode};
use crate::error::GatewayError;

/// Keyed store of [`InsuranceEpisode`]s with status and category filters.
///
/// All `find_*` methods return snapshots ordered by id; an empty result is
/// not an error.
#[derive(Debug, Default)]
pub struct EpisodeRepository {
    store: EntityStore<InsuranceEpisode>,
}

impl EpisodeRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up one episode.
    pub async fn find_by_id(&self, id: &str) -> Option<InsuranceEpisode> {
        self.store.find_by_id(id).await
    }

    /// Returns every episode.
    pub async fn find_all(&self) -> Vec<InsuranceEpisode> {
        self.store.find_all().await
    }

    /// Returns episodes in `status`.
    pub async fn find_by_status(&self, status: EpisodeStatus) -> Vec<InsuranceEpisode> {
        self.store.filter(|e| e.status() == status).await
    }

    /// Returns episodes in `category`.
    pub async fn find_by_category(&self, category: Category) -> Vec<InsuranceEpisode> {
        self.store.filter(|e| e.category() == category).await
    }

    /// Returns episodes matching both `status` and `category`.
    pub async fn find_by_status_and_category(
        &self,
        status: EpisodeStatus,
        category: Category,
    ) -> Vec<InsuranceEpisode> {
        self.store
            .filter(|e| e.status() == status && e.category() == category)
            .await
    }

    /// Inserts or replaces an episode.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the episode id is empty.
    pub async fn save(&self, episode: InsuranceEpisode) -> Result<(), GatewayError> {
        self.store.save(episode).await
    }

    /// Bulk-loads episodes at startup.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if any episode id is empty; in
    /// that case nothing is loaded.
    pub async fn initialize(&self, episodes: Vec<InsuranceEpisode>) -> Result<(), GatewayError> {
        self.store.initialize(episodes, |_, _| Ok(())).await
    }

    /// Moves an episode to `status` and returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the episode does not exist.
    pub async fn update_status(
        &self,
        id: &str,
        status: EpisodeStatus,
    ) -> Result<InsuranceEpisode, GatewayError> {
        self.store.update(id, |e| e.update_status(status)).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::episode::tests::draft;

    async fn seeded() -> EpisodeRepository {
        let repo = EpisodeRepository::new();
        let episodes = vec![
            InsuranceEpisode::new(draft(
                "ke902",
                EpisodeStatus::Recruiting,
                Category::FlightDelay,
            )),
            InsuranceEpisode::new(draft(
                "jejuTyphoon",
                EpisodeStatus::Recruiting,
                Category::Weather,
            )),
            InsuranceEpisode::new(draft(
                "gimpoJeju",
                EpisodeStatus::Active,
                Category::FlightDelay,
            )),
            InsuranceEpisode::new(draft(
                "tokyoCherry",
                EpisodeStatus::Settling,
                Category::TripCancel,
            )),
        ];
        let Ok(()) = repo.initialize(episodes).await else {
            panic!("seed failed");
        };
        repo
    }

    #[tokio::test]
    async fn single_recruiting_episode() {
        let repo = EpisodeRepository::new();
        let Ok(()) = repo
            .save(InsuranceEpisode::new(draft(
                "ke902",
                EpisodeStatus::Recruiting,
                Category::FlightDelay,
            )))
            .await
        else {
            panic!("save failed");
        };

        let recruiting = repo.find_by_status(EpisodeStatus::Recruiting).await;
        assert_eq!(recruiting.len(), 1);
        assert_eq!(recruiting.first().map(InsuranceEpisode::id), Some("ke902"));
        assert!(repo.find_by_status(EpisodeStatus::Active).await.is_empty());
    }

    #[tokio::test]
    async fn saved_episode_reads_back_equal() {
        let repo = EpisodeRepository::new();
        let episode = InsuranceEpisode::new(draft(
            "ke902",
            EpisodeStatus::Recruiting,
            Category::FlightDelay,
        ));
        let _ = repo.save(episode.clone()).await;
        assert_eq!(repo.find_by_id("ke902").await, Some(episode));
        assert!(repo.find_by_id("missing").await.is_none());
    }

    #[tokio::test]
    async fn combined_filter_is_intersection() {
        let repo = seeded().await;
        let statuses = [
            EpisodeStatus::Recruiting,
            EpisodeStatus::Active,
            EpisodeStatus::Settling,
            EpisodeStatus::Completed,
        ];
        let categories = [Category::FlightDelay, Category::Weather, Category::TripCancel];

        for status in statuses {
            for category in categories {
                let ids = |v: Vec<InsuranceEpisode>| -> HashSet<String> {
                    v.iter().map(|e| e.id().to_string()).collect()
                };
                let both = ids(repo.find_by_status_and_category(status, category).await);
                let by_status = ids(repo.find_by_status(status).await);
                let by_category = ids(repo.find_by_category(category).await);
                let expected: HashSet<String> =
                    by_status.intersection(&by_category).cloned().collect();
                assert_eq!(both, expected, "{status}/{category}");
            }
        }
    }

    #[tokio::test]
    async fn update_status_is_visible_to_filters() {
        let repo = seeded().await;
        let Ok(updated) = repo.update_status("ke902", EpisodeStatus::Completed).await else {
            panic!("update failed");
        };
        assert_eq!(updated.status(), EpisodeStatus::Completed);
        assert_eq!(repo.find_by_status(EpisodeStatus::Completed).await.len(), 1);
        assert!(repo.update_status("nope", EpisodeStatus::Active).await.is_err());
    }
}
