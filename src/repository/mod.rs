//! Repositories: one store per entity type.
//!
//! Episodes, pools and transactions live in memory in an
//! [`EntityStore`](crate::domain::EntityStore). User/episode associations
//! live in the hosted database behind a
//! [`TableStore`](crate::persistence::TableStore).

pub mod episode_repository;
pub mod pool_repository;
pub mod transaction_repository;
pub mod user_episode_repository;

pub use episode_repository::EpisodeRepository;
pub use pool_repository::PoolRepository;
pub use transaction_repository::TransactionRepository;
pub use user_episode_repository::UserEpisodeRepository;
