//! User/episode associations stored in the hosted database.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ExternalServiceError;
use crate::persistence::models::UserEpisode;
use crate::persistence::{Row, StoreResult, TableStore};

/// Default table name.
pub const DEFAULT_TABLE: &str = "user_episodes";

/// Reads and writes `user_episodes` rows through a [`TableStore`],
/// decoding each row into a [`UserEpisode`].
#[derive(Clone)]
pub struct UserEpisodeRepository {
    store: Arc<dyn TableStore>,
    table: String,
}

impl std::fmt::Debug for UserEpisodeRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserEpisodeRepository")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl UserEpisodeRepository {
    /// Creates a repository over `store` using `table`.
    #[must_use]
    pub fn new(store: Arc<dyn TableStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Inserts a new association; `id`, `progress` and `created_at` are
    /// filled in by the database.
    ///
    /// # Errors
    ///
    /// Propagates store failures; returns [`ExternalServiceError::Decode`]
    /// if the database returns no row or an undecodable one.
    pub async fn create(&self, user: &str, episode: &str) -> StoreResult<UserEpisode> {
        let mut row = Row::new();
        row.insert("user".to_string(), Value::String(user.to_string()));
        row.insert("episode".to_string(), Value::String(episode.to_string()));

        let inserted = self.store.insert(&self.table, row).await?;
        let first = inserted
            .into_iter()
            .next()
            .ok_or_else(|| ExternalServiceError::Decode {
                service: "supabase",
                reason: format!("insert into {} returned no row", self.table),
            })?;
        decode(first)
    }

    /// Returns every association of `user`.
    ///
    /// # Errors
    ///
    /// Propagates store failures and row decode failures.
    pub async fn find_by_user(&self, user: &str) -> StoreResult<Vec<UserEpisode>> {
        self.find_by("user", user).await
    }

    /// Returns every association with `episode`.
    ///
    /// # Errors
    ///
    /// Propagates store failures and row decode failures.
    pub async fn find_by_episode(&self, episode: &str) -> StoreResult<Vec<UserEpisode>> {
        self.find_by("episode", episode).await
    }

    async fn find_by(&self, column: &str, value: &str) -> StoreResult<Vec<UserEpisode>> {
        self.store
            .select_where_eq(&self.table, column, value)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }
}

fn decode(row: Row) -> StoreResult<UserEpisode> {
    UserEpisode::from_row(row).map_err(|reason| ExternalServiceError::Decode {
        service: "supabase",
        reason,
    })
}
