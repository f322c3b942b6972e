//! Episode DTOs: catalogue list, detail with rules, dashboard, and the
//! on-chain episode views.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::common_dto::{LIST_LIMIT, LIST_PAGE, NONE_TEXT, OracleDto};
use crate::domain::{Category, EpisodeStatus, Icon, InsuranceEpisode};

/// Episode as listed in the catalogue.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDto {
    /// Episode identifier.
    pub id: String,
    /// Insured event kind.
    pub category: Category,
    /// Lifecycle status.
    pub status: EpisodeStatus,
    /// Display title.
    pub title: String,
    /// Optional subtitle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Coverage window text.
    pub event_window: String,
    /// Trigger rule text.
    pub trigger_condition: String,
    /// Premium amount.
    pub premium: f64,
    /// Premium currency.
    pub premium_currency: String,
    /// Maximum payout amount.
    pub max_payout: f64,
    /// Payout currency.
    pub payout_currency: String,
    /// Additional contributions text, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_contributions: Option<String>,
    /// Pool logic text, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_logic: Option<String>,
    /// Resolution oracle, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle: Option<OracleDto>,
    /// When the pool closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_closes_at: Option<DateTime<Utc>>,
    /// When the event window ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_ends_at: Option<DateTime<Utc>>,
    /// Display icon.
    pub icon: Icon,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&InsuranceEpisode> for EpisodeDto {
    fn from(e: &InsuranceEpisode) -> Self {
        Self {
            id: e.id().to_string(),
            category: e.category(),
            status: e.status(),
            title: e.title().to_string(),
            subtitle: e.subtitle().map(str::to_string),
            event_window: e.event_window().to_string(),
            trigger_condition: e.trigger_condition().to_string(),
            premium: e.premium().amount,
            premium_currency: e.premium().currency.clone(),
            max_payout: e.max_payout().amount,
            payout_currency: e.max_payout().currency.clone(),
            additional_contributions: e.additional_contributions().map(str::to_string),
            pool_logic: e.pool_logic().map(str::to_string),
            oracle: e.oracle().map(OracleDto::from),
            pool_closes_at: e.pool_closes_at(),
            event_ends_at: e.event_ends_at(),
            icon: e.icon(),
            created_at: e.created_at(),
            updated_at: e.updated_at(),
        }
    }
}

/// Response for `GET /api/events`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EpisodesResponse {
    /// Matching episodes.
    pub events: Vec<EpisodeDto>,
    /// Number of matching episodes.
    pub total: usize,
    /// Always 1.
    pub page: u32,
    /// Always 20.
    pub limit: u32,
}

impl EpisodesResponse {
    /// Wraps `events` in the fixed list envelope.
    #[must_use]
    pub fn new(events: Vec<EpisodeDto>) -> Self {
        Self {
            total: events.len(),
            events,
            page: LIST_PAGE,
            limit: LIST_LIMIT,
        }
    }
}

/// What is covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoveredEventDto {
    /// Episode title.
    pub event: String,
    /// Coverage window text.
    pub event_window: String,
    /// Trigger rule text.
    pub trigger_condition: String,
}

/// Money terms of the cover.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTermsDto {
    /// Premium amount.
    pub premium: f64,
    /// Maximum payout amount.
    pub max_payout: f64,
    /// Additional contributions text, or `"none"`.
    pub additional_contributions: String,
}

/// Rules block of the detail view. Absent optional fields are shown as
/// `"N/A"` (oracle) or `"none"` (texts).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRulesDto {
    /// What is covered.
    pub covered_event: CoveredEventDto,
    /// Resolution oracle.
    pub oracle: OracleDto,
    /// Money terms.
    pub financial_terms: FinancialTermsDto,
    /// Pool logic text, or `"none"`.
    pub pool_logic: String,
}

impl From<&InsuranceEpisode> for EpisodeRulesDto {
    fn from(e: &InsuranceEpisode) -> Self {
        Self {
            covered_event: CoveredEventDto {
                event: e.title().to_string(),
                event_window: e.event_window().to_string(),
                trigger_condition: e.trigger_condition().to_string(),
            },
            oracle: e
                .oracle()
                .map_or_else(OracleDto::not_available, OracleDto::from),
            financial_terms: FinancialTermsDto {
                premium: e.premium().amount,
                max_payout: e.max_payout().amount,
                additional_contributions: e
                    .additional_contributions()
                    .unwrap_or(NONE_TEXT)
                    .to_string(),
            },
            pool_logic: e.pool_logic().unwrap_or(NONE_TEXT).to_string(),
        }
    }
}

/// Response for `GET /api/events/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EpisodeDetailDto {
    /// Catalogue fields.
    #[serde(flatten)]
    pub episode: EpisodeDto,
    /// Presentation rules.
    pub rules: EpisodeRulesDto,
}

impl From<&InsuranceEpisode> for EpisodeDetailDto {
    fn from(e: &InsuranceEpisode) -> Self {
        Self {
            episode: EpisodeDto::from(e),
            rules: EpisodeRulesDto::from(e),
        }
    }
}

/// Seconds remaining until the episode deadlines, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountdownDto {
    /// Seconds until the pool closes.
    pub pool_closes_in: i64,
    /// Seconds until the event window ends.
    pub event_ends_in: i64,
}

impl CountdownDto {
    /// Computes the countdown at `now`. Missing deadlines count as passed.
    #[must_use]
    pub fn at(e: &InsuranceEpisode, now: DateTime<Utc>) -> Self {
        let remaining = |deadline: Option<DateTime<Utc>>| {
            deadline.map_or(0, |at| (at - now).num_seconds().max(0))
        };
        Self {
            pool_closes_in: remaining(e.pool_closes_at()),
            event_ends_in: remaining(e.event_ends_at()),
        }
    }
}

/// Response for `GET /api/events/{id}/dashboard`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EpisodeDashboardDto {
    /// Detail view.
    #[serde(flatten)]
    pub detail: EpisodeDetailDto,
    /// Time left.
    pub countdown: CountdownDto,
}

/// Response for `GET /api/episodes`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChainEpisodesResponse {
    /// Distinct episode contract addresses.
    pub episodes: Vec<String>,
}

/// One decoded contract event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeEventDto {
    /// Event name from the topic table, or `"Unknown"`.
    pub event_name: String,
    /// Emitting transaction.
    pub transaction_hash: String,
    /// Block number, as an integer when parseable.
    #[schema(value_type = Object)]
    pub block_number: serde_json::Value,
    /// `YYYY-MM-DD HH:MM:SS` (UTC), or the raw value if unparseable.
    pub timestamp: String,
    /// Raw topics.
    pub topics: Vec<String>,
    /// Raw payload.
    pub data: String,
}

/// Response for `GET /api/episodes/{address}/events`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EpisodeEventsResponse {
    /// Contract address queried.
    pub episode: String,
    /// Decoded events in explorer order.
    pub events: Vec<EpisodeEventDto>,
    /// Number of events.
    pub total: usize,
}
