//! Data Transfer Objects for REST request/response serialization.
//!
//! Catalogue DTOs use camelCase keys; user/episode rows keep the column
//! names of the hosted table.

pub mod common_dto;
pub mod episode_dto;
pub mod pool_dto;
pub mod stats_dto;
pub mod transaction_dto;
pub mod user_episode_dto;

pub use common_dto::*;
pub use episode_dto::*;
pub use pool_dto::*;
pub use stats_dto::*;
pub use transaction_dto::*;
pub use user_episode_dto::*;
