//! Domain layer: insurance episodes, pools, transactions and statistics.
//!
//! Entities expose read-only getters and a small set of mutating methods.
//! They are stored in [`EntityStore`], a generic concurrent map keyed by id.

pub mod catalog;
pub mod entity_store;
pub mod episode;
pub mod pool;
pub mod stats;
pub mod transaction;

pub use catalog::{Category, Icon, Money, UnknownVariant};
pub use entity_store::{Entity, EntityStore};
pub use episode::{EpisodeDraft, EpisodeStatus, InsuranceEpisode, Oracle};
pub use pool::{Pool, PoolDraft, PoolStatus};
pub use stats::{HomeStats, NetworkProfile, NetworkStats, TransactionStats};
pub use transaction::{Transaction, TransactionDraft, TransactionStatus, TransactionType};
