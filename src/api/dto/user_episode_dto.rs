//! User/episode association DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::models::UserEpisode;

/// Request body for `POST /api/user-episodes`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserEpisodeRequest {
    /// User identifier.
    #[serde(default)]
    pub user: String,
    /// Episode identifier.
    #[serde(default)]
    pub episode: String,
}

/// Query for `GET /api/user-episodes`. Exactly one filter is used;
/// `user` wins when both are sent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserEpisodeQuery {
    /// Select associations of this user.
    #[serde(default)]
    pub user: Option<String>,
    /// Select associations with this episode.
    #[serde(default)]
    pub episode: Option<String>,
}

/// One association row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserEpisodeDto {
    /// Row id.
    pub id: i64,
    /// User identifier.
    pub user: String,
    /// Episode identifier.
    pub episode: String,
    /// Progress marker, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Creation timestamp as stored.
    pub created_at: String,
}

impl From<UserEpisode> for UserEpisodeDto {
    fn from(row: UserEpisode) -> Self {
        Self {
            id: row.id,
            user: row.user,
            episode: row.episode,
            progress: row.progress,
            created_at: row.created_at,
        }
    }
}

/// Response for `GET /api/user-episodes?user=`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserEpisodesResponse {
    /// Episodes the user engaged with.
    pub episodes: Vec<UserEpisodeDto>,
}

/// Response for `GET /api/user-episodes?episode=`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EpisodeUsersResponse {
    /// Users engaged with the episode.
    pub users: Vec<UserEpisodeDto>,
}

/// Response for `GET /api/user-episodes`, shaped by the filter used.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UserEpisodeListing {
    /// Filtered by user.
    ByUser(UserEpisodesResponse),
    /// Filtered by episode.
    ByEpisode(EpisodeUsersResponse),
}
