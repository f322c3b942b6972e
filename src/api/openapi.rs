//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::handlers::{episode, pool, stats, system, transaction, user_episode};
use crate::error::{ErrorBody, ErrorResponse};

/// Path of the generated OpenAPI JSON document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "eventsure-gateway",
        description = "Parametric insurance episodes, risk pools, transactions and statistics."
    ),
    paths(
        system::health_handler,
        episode::list_events,
        episode::get_event,
        episode::get_event_pool,
        episode::get_event_dashboard,
        episode::list_episodes,
        episode::list_episode_events,
        pool::list_pools,
        transaction::list_transactions,
        transaction::transaction_stats,
        stats::home_stats,
        user_episode::create_user_episode,
        user_episode::list_user_episodes,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    tags(
        (name = "System", description = "Service health"),
        (name = "Events", description = "Insurance episode catalogue"),
        (name = "Episodes", description = "Episode contracts read from the block explorer"),
        (name = "Pools", description = "Risk pools"),
        (name = "Transactions", description = "Transaction feed and statistics"),
        (name = "Stats", description = "Landing-page statistics"),
        (name = "User Episodes", description = "Which users engaged with which episodes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/events",
            "/api/events/{id}",
            "/api/events/{id}/pool",
            "/api/events/{id}/dashboard",
            "/api/episodes",
            "/api/episodes/{address}/events",
            "/api/pools",
            "/api/transactions",
            "/api/transactions/stats",
            "/api/stats/home",
            "/api/user-episodes",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} is undocumented");
        }
    }
}
