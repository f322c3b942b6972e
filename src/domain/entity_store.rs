//! Concurrent in-memory storage keyed by entity id.
//!
//! [`EntityStore`] keeps every entity of one type in a `HashMap` behind a
//! single [`tokio::sync::RwLock`]. Lookups take the lock in shared mode and
//! clone what they return, so callers always hold a snapshot. Writes
//! (`save`, `initialize`, `update`) take the lock exclusively.
//!
//! The lock is never held across a call into another store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::GatewayError;

/// An entity that can be kept in an [`EntityStore`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Name used in error messages (e.g. `"episode"`).
    const KIND: &'static str;

    /// Stable identifier.
    fn id(&self) -> &str;
}

/// Returns a mutation timestamp that is never earlier than `created_at`.
pub(crate) fn touch(created_at: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(created_at)
}

/// Keyed store for one entity type.
///
/// # Concurrency
///
/// - Readers run concurrently with each other.
/// - Writers exclude every other reader and writer on the same store.
/// - Stores are independent: no operation locks two of them.
#[derive(Debug)]
pub struct EntityStore<T> {
    items: RwLock<HashMap<String, T>>,
}

impl<T: Entity> EntityStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the entity with `id`, or `None` if absent.
    pub async fn find_by_id(&self, id: &str) -> Option<T> {
        self.items.read().await.get(id).cloned()
    }

    /// Returns a snapshot of every entity, ordered by id.
    pub async fn find_all(&self) -> Vec<T> {
        self.filter(|_| true).await
    }

    /// Returns the entities matching `pred`, ordered by id.
    pub async fn filter<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let map = self.items.read().await;
        let mut out: Vec<T> = map.values().filter(|item| pred(item)).cloned().collect();
        drop(map);
        out.sort_by(|a, b| a.id().cmp(b.id()));
        out
    }

    /// Returns the first entity matching `pred` in id order.
    pub async fn find_first<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let map = self.items.read().await;
        map.values()
            .filter(|item| pred(item))
            .min_by(|a, b| a.id().cmp(b.id()))
            .cloned()
    }

    /// Inserts or replaces `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the entity has an empty id.
    pub async fn save(&self, entity: T) -> Result<(), GatewayError> {
        self.save_checked(entity, |_, _| Ok(())).await
    }

    /// Inserts or replaces `entity` after `check` accepts it against the
    /// current contents. `check` runs under the write lock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an empty id, or whatever
    /// `check` returns.
    pub async fn save_checked<C>(&self, entity: T, check: C) -> Result<(), GatewayError>
    where
        C: Fn(&HashMap<String, T>, &T) -> Result<(), GatewayError>,
    {
        ensure_id(&entity)?;
        let mut map = self.items.write().await;
        check(&map, &entity)?;
        map.insert(entity.id().to_string(), entity);
        Ok(())
    }

    /// Bulk-loads `entities` under a single write lock.
    ///
    /// Each entity is validated like [`EntityStore::save_checked`]; on the
    /// first failure nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub async fn initialize<C>(&self, entities: Vec<T>, check: C) -> Result<(), GatewayError>
    where
        C: Fn(&HashMap<String, T>, &T) -> Result<(), GatewayError>,
    {
        let mut map = self.items.write().await;
        let mut staged = map.clone();
        for entity in entities {
            ensure_id(&entity)?;
            check(&staged, &entity)?;
            staged.insert(entity.id().to_string(), entity);
        }
        *map = staged;
        Ok(())
    }

    /// Applies `f` to the entity with `id` under the write lock and returns
    /// the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if no entity has `id`.
    pub async fn update<F>(&self, id: &str, f: F) -> Result<T, GatewayError>
    where
        F: FnOnce(&mut T),
    {
        let mut map = self.items.write().await;
        let entity = map
            .get_mut(id)
            .ok_or_else(|| GatewayError::not_found(T::KIND, id))?;
        f(entity);
        Ok(entity.clone())
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_id<T: Entity>(entity: &T) -> Result<(), GatewayError> {
    if entity.id().is_empty() {
        return Err(GatewayError::Validation(format!(
            "{} id must not be empty",
            T::KIND
        )));
    }
    Ok(())
}
