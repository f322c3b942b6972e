//! eventsure-gateway server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use eventsure_gateway::api;
use eventsure_gateway::app_state::AppState;
use eventsure_gateway::chain::BlockExplorer;
use eventsure_gateway::chain::etherscan::EtherscanClient;
use eventsure_gateway::config::{GatewayConfig, LogFormat};
use eventsure_gateway::persistence::supabase::SupabaseRestClient;
use eventsure_gateway::repository::{
    EpisodeRepository, PoolRepository, TransactionRepository, UserEpisodeRepository,
};
use eventsure_gateway::seed;
use eventsure_gateway::service::{
    EpisodeService, PoolService, StatsService, TransactionService, UserEpisodeService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting eventsure-gateway");

    // Build collaborators
    let explorer: Option<Arc<dyn BlockExplorer>> = match config.etherscan.clone() {
        Some(settings) => Some(Arc::new(EtherscanClient::new(settings)?)),
        None => {
            tracing::warn!("ETHERSCAN_API_KEY not set; on-chain episode endpoints are disabled");
            None
        }
    };
    if config.episode_factory_address.is_none() {
        tracing::warn!("EPISODE_CONTRACT_FACTORY not set; /api/episodes is disabled");
    }
    let user_episodes = match config.supabase.clone() {
        Some(settings) => Some(UserEpisodeRepository::new(
            Arc::new(SupabaseRestClient::new(settings)?),
            config.user_episodes_table.clone(),
        )),
        None => {
            tracing::warn!("Supabase not configured; user episode endpoints are disabled");
            None
        }
    };

    // Build repositories
    let episodes = Arc::new(EpisodeRepository::new());
    let pools = Arc::new(PoolRepository::new());
    let transactions = Arc::new(TransactionRepository::new());
    if config.seed_mock_data {
        seed::seed(&episodes, &pools, &transactions).await?;
    }

    // Build application state
    let app_state = AppState {
        episode_service: Arc::new(EpisodeService::new(
            episodes,
            explorer,
            config.episode_factory_address.clone(),
        )),
        pool_service: Arc::new(PoolService::new(Arc::clone(&pools))),
        transaction_service: Arc::new(TransactionService::new(
            Arc::clone(&transactions),
            Arc::clone(&pools),
            config.network.clone(),
        )),
        stats_service: Arc::new(StatsService::new(
            pools,
            transactions,
            config.network.default_currency.clone(),
        )),
        user_episode_service: Arc::new(UserEpisodeService::new(user_episodes)),
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
