//! User/episode association use cases.

use crate::api::dto::{EpisodeUsersResponse, UserEpisodeDto, UserEpisodesResponse};
use crate::error::GatewayError;
use crate::repository::UserEpisodeRepository;

/// Records and lists which users engaged with which episodes.
///
/// Built without a repository when the hosted database is not configured;
/// every call then fails with [`GatewayError::UninitializedDependency`]
/// before looking at its input.
#[derive(Debug, Clone)]
pub struct UserEpisodeService {
    repository: Option<UserEpisodeRepository>,
}

impl UserEpisodeService {
    /// Creates a new `UserEpisodeService`.
    #[must_use]
    pub fn new(repository: Option<UserEpisodeRepository>) -> Self {
        Self { repository }
    }

    fn repository(&self) -> Result<&UserEpisodeRepository, GatewayError> {
        self.repository.as_ref().ok_or_else(|| {
            GatewayError::UninitializedDependency("user episode repository".to_string())
        })
    }

    /// Records that `user` engaged with `episode`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UninitializedDependency`] without a
    /// repository, [`GatewayError::Validation`] for an empty field, and
    /// [`GatewayError::ExternalService`] if the database call fails.
    pub async fn create_user_episode(
        &self,
        user: &str,
        episode: &str,
    ) -> Result<UserEpisodeDto, GatewayError> {
        let repository = self.repository()?;
        require("user", user)?;
        require("episode", episode)?;
        Ok(repository.create(user, episode).await?.into())
    }

    /// Lists the episodes `user` engaged with.
    ///
    /// # Errors
    ///
    /// Same conditions as [`UserEpisodeService::create_user_episode`].
    pub async fn get_user_episodes(
        &self,
        user: &str,
    ) -> Result<UserEpisodesResponse, GatewayError> {
        let repository = self.repository()?;
        require("user", user)?;
        let rows = repository.find_by_user(user).await?;
        Ok(UserEpisodesResponse {
            episodes: rows.into_iter().map(UserEpisodeDto::from).collect(),
        })
    }

    /// Lists the users engaged with `episode`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`UserEpisodeService::create_user_episode`].
    pub async fn get_episode_users(
        &self,
        episode: &str,
    ) -> Result<EpisodeUsersResponse, GatewayError> {
        let repository = self.repository()?;
        require("episode", episode)?;
        let rows = repository.find_by_episode(episode).await?;
        Ok(EpisodeUsersResponse {
            users: rows.into_iter().map(UserEpisodeDto::from).collect(),
        })
    }
}

fn require(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.is_empty() {
        return Err(GatewayError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::Mutex;

    use super::*;
    use crate::persistence::{Row, StoreResult, TableStore};
    use crate::repository::user_episode_repository::DEFAULT_TABLE;

    #[derive(Default)]
    struct MemoryTable {
        rows: Mutex<Vec<Row>>,
    }

    #[async_trait]
    impl TableStore for MemoryTable {
        async fn insert(&self, _table: &str, mut row: Row) -> StoreResult<Vec<Row>> {
            let mut rows = self.rows.lock().await;
            row.insert("id".to_string(), Value::from(rows.len() + 1));
            row.insert(
                "created_at".to_string(),
                Value::from("2025-01-15T12:00:00+00:00"),
            );
            rows.push(row.clone());
            Ok(vec![row])
        }

        async fn select_where_eq(
            &self,
            _table: &str,
            column: &str,
            value: &str,
        ) -> StoreResult<Vec<Row>> {
            Ok(self
                .rows
                .lock()
                .await
                .iter()
                .filter(|r| r.get(column).and_then(Value::as_str) == Some(value))
                .cloned()
                .collect())
        }
    }

    fn service() -> UserEpisodeService {
        UserEpisodeService::new(Some(UserEpisodeRepository::new(
            Arc::new(MemoryTable::default()),
            DEFAULT_TABLE,
        )))
    }

    #[tokio::test]
    async fn create_then_list_for_user() {
        let svc = service();
        assert!(matches!(
            svc.create_user_episode("", "ep1").await,
            Err(GatewayError::Validation(_))
        ));

        let Ok(created) = svc.create_user_episode("alice", "ep1").await else {
            panic!("create failed");
        };
        assert_eq!(created.user, "alice");

        let Ok(listed) = svc.get_user_episodes("alice").await else {
            panic!("list failed");
        };
        assert!(listed.episodes.contains(&created));
    }

    #[tokio::test]
    async fn episode_users_lists_everyone() {
        let svc = service();
        let _ = svc.create_user_episode("alice", "ep1").await;
        let _ = svc.create_user_episode("bob", "ep1").await;
        let _ = svc.create_user_episode("bob", "ep2").await;
        let Ok(users) = svc.get_episode_users("ep1").await else {
            panic!("list failed");
        };
        assert_eq!(users.users.len(), 2);
    }

    #[tokio::test]
    async fn empty_lookups_are_rejected() {
        let svc = service();
        assert!(matches!(
            svc.get_user_episodes("").await,
            Err(GatewayError::Validation(_))
        ));
        assert!(matches!(
            svc.get_episode_users("").await,
            Err(GatewayError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_repository_fails_first() {
        let svc = UserEpisodeService::new(None);
        assert!(matches!(
            svc.create_user_episode("", "").await,
            Err(GatewayError::UninitializedDependency(_))
        ));
        assert!(matches!(
            svc.get_user_episodes("alice").await,
            Err(GatewayError::UninitializedDependency(_))
        ));
    }
}
