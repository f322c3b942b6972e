//! Service layer: use cases over the repositories and collaborators.
//!
//! Services never log; they return typed errors for the HTTP layer to
//! render.

pub mod episode_service;
pub mod pagination;
pub mod pool_service;
pub mod stats_service;
pub mod transaction_service;
pub mod user_episode_service;

pub use episode_service::EpisodeService;
pub use pool_service::PoolService;
pub use stats_service::StatsService;
pub use transaction_service::TransactionService;
pub use user_episode_service::UserEpisodeService;
