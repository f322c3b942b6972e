//! Episode use cases: the catalogue and on-chain episode contracts.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::dto::{
    ChainEpisodesResponse, CountdownDto, EpisodeDashboardDto, EpisodeDetailDto, EpisodeDto,
    EpisodeEventDto, EpisodeEventsResponse, EpisodesResponse, ListQuery,
};
use crate::chain::timestamp::{normalize_timestamp, parse_quantity};
use crate::chain::{BlockExplorer, EventLog, SortOrder, topics};
use crate::domain::{Category, EpisodeStatus, InsuranceEpisode};
use crate::error::GatewayError;
use crate::repository::EpisodeRepository;

/// Orchestrates episode queries over the [`EpisodeRepository`] and the
/// block explorer.
#[derive(Clone)]
pub struct EpisodeService {
    episodes: Arc<EpisodeRepository>,
    explorer: Option<Arc<dyn BlockExplorer>>,
    factory_address: Option<String>,
}

impl std::fmt::Debug for EpisodeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpisodeService")
            .field("explorer", &self.explorer.is_some())
            .field("factory_address", &self.factory_address)
            .finish_non_exhaustive()
    }
}

impl EpisodeService {
    /// Creates a new `EpisodeService`.
    ///
    /// `explorer` and `factory_address` are optional; the on-chain queries
    /// fail with [`GatewayError::Config`] while either is missing.
    #[must_use]
    pub fn new(
        episodes: Arc<EpisodeRepository>,
        explorer: Option<Arc<dyn BlockExplorer>>,
        factory_address: Option<String>,
    ) -> Self {
        Self {
            episodes,
            explorer,
            factory_address: factory_address.filter(|a| !a.is_empty()),
        }
    }

    /// Lists catalogue episodes filtered by status and/or category.
    pub async fn get_episodes(&self, query: &ListQuery) -> EpisodesResponse {
        let items = self.filter(query).await;
        EpisodesResponse::new(items.iter().map(EpisodeDto::from).collect())
    }

    async fn filter(&self, query: &ListQuery) -> Vec<InsuranceEpisode> {
        let status = query.status.as_deref().map(str::parse::<EpisodeStatus>);
        let category = query.category.as_deref().map(str::parse::<Category>);
        match (status, category) {
            (Some(Ok(s)), Some(Ok(c))) => self.episodes.find_by_status_and_category(s, c).await,
            (Some(Ok(s)), None) => self.episodes.find_by_status(s).await,
            (None, Some(Ok(c))) => self.episodes.find_by_category(c).await,
            (None, None) => self.episodes.find_all().await,
            // A filter naming an unknown variant matches nothing.
            _ => Vec::new(),
        }
    }

    /// Returns the detail view of episode `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the episode does not exist.
    pub async fn get_episode_detail(&self, id: &str) -> Result<EpisodeDetailDto, GatewayError> {
        let episode = self.find(id).await?;
        Ok(EpisodeDetailDto::from(&episode))
    }

    /// Returns the detail view of episode `id` with the time left until
    /// its deadlines at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the episode does not exist.
    pub async fn get_episode_dashboard(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<EpisodeDashboardDto, GatewayError> {
        let episode = self.find(id).await?;
        Ok(EpisodeDashboardDto {
            detail: EpisodeDetailDto::from(&episode),
            countdown: CountdownDto::at(&episode, now),
        })
    }

    async fn find(&self, id: &str) -> Result<InsuranceEpisode, GatewayError> {
        self.episodes
            .find_by_id(id)
            .await
            .ok_or_else(|| GatewayError::not_found("episode", id))
    }

    /// Lists the distinct episode contracts created by the factory, in the
    /// order the explorer first reports them.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the factory address or explorer
    /// is not configured, and [`GatewayError::ExternalService`] if the
    /// explorer call fails.
    pub async fn get_all_episodes(&self) -> Result<ChainEpisodesResponse, GatewayError> {
        let factory = self.factory_address.as_deref().ok_or_else(|| {
            GatewayError::Config("EPISODE_CONTRACT_FACTORY is not set".to_string())
        })?;
        let explorer = self.explorer()?;

        let calls = explorer
            .internal_transactions(factory, SortOrder::Desc)
            .await?;

        let mut seen = HashSet::new();
        let episodes = calls
            .into_iter()
            .map(|call| call.contract_address)
            .filter(|address| !address.is_empty() && seen.insert(address.clone()))
            .collect();

        Ok(ChainEpisodesResponse { episodes })
    }

    /// Lists the events emitted by episode contract `address`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an empty address,
    /// [`GatewayError::Config`] if no explorer is configured, and
    /// [`GatewayError::ExternalService`] if the explorer call fails.
    pub async fn get_episode_events(
        &self,
        address: &str,
    ) -> Result<EpisodeEventsResponse, GatewayError> {
        if address.is_empty() {
            return Err(GatewayError::Validation(
                "episode address is required".to_string(),
            ));
        }
        let explorer = self.explorer()?;
        let logs = explorer.event_logs(address).await?;
        let events: Vec<EpisodeEventDto> = logs.into_iter().map(to_event_dto).collect();

        Ok(EpisodeEventsResponse {
            episode: address.to_string(),
            total: events.len(),
            events,
        })
    }

    fn explorer(&self) -> Result<&Arc<dyn BlockExplorer>, GatewayError> {
        self.explorer.as_ref().ok_or_else(|| {
            GatewayError::Config("ETHERSCAN_API_KEY is not set".to_string())
        })
    }
}

fn to_event_dto(log: EventLog) -> EpisodeEventDto {
    let block_number = parse_quantity(&log.block_number)
        .map_or_else(|| serde_json::Value::String(log.block_number.clone()), Into::into);
    EpisodeEventDto {
        event_name: topics::event_name_for(&log.topics).to_string(),
        transaction_hash: log.transaction_hash,
        block_number,
        timestamp: normalize_timestamp(&log.time_stamp),
        topics: log.topics,
        data: log.data,
    }
}
