//! The insurance episode aggregate.
//!
//! An [`InsuranceEpisode`] is one parametric-insurance product tied to a
//! real-world trigger (a flight delay, a typhoon). It is created from an
//! [`EpisodeDraft`] holding the required fields; optional presentation
//! fields are filled in afterwards through the `set_*` methods.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{Category, Icon, Money, UnknownVariant};
use super::entity_store::{Entity, touch};

/// Lifecycle stage of an episode.
///
/// Transitions are not validated: any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    /// Accepting members.
    Recruiting,
    /// Coverage window running.
    Active,
    /// Outcome known, payouts in progress.
    Settling,
    /// Fully settled.
    Completed,
}

impl EpisodeStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::Active => "active",
            Self::Settling => "settling",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for EpisodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EpisodeStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recruiting" => Ok(Self::Recruiting),
            "active" => Ok(Self::Active),
            "settling" => Ok(Self::Settling),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownVariant::new("episode status", other)),
        }
    }
}

/// Data source and timing used to resolve an episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oracle {
    /// Where the outcome is read from (e.g. `"FlightStats API"`).
    pub data_source: String,
    /// When the outcome is read (e.g. `"24h after the event ends"`).
    pub resolution_time: String,
}

impl Oracle {
    /// Creates a new `Oracle`.
    #[must_use]
    pub fn new(data_source: impl Into<String>, resolution_time: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            resolution_time: resolution_time.into(),
        }
    }
}

/// Required fields for creating an [`InsuranceEpisode`].
#[derive(Debug, Clone)]
pub struct EpisodeDraft {
    /// Stable identifier (e.g. `"ke902"`).
    pub id: String,
    /// Insured event kind.
    pub category: Category,
    /// Initial lifecycle status.
    pub status: EpisodeStatus,
    /// Display title.
    pub title: String,
    /// Human-readable coverage window.
    pub event_window: String,
    /// Human-readable trigger rule.
    pub trigger_condition: String,
    /// Premium each member pays.
    pub premium: Money,
    /// Maximum payout per member.
    pub max_payout: Money,
    /// Display icon.
    pub icon: Icon,
}

/// Aggregate root for a parametric-insurance episode.
#[derive(Debug, Clone, PartialEq)]
pub struct InsuranceEpisode {
    id: String,
    category: Category,
    status: EpisodeStatus,
    title: String,
    subtitle: Option<String>,
    event_window: String,
    trigger_condition: String,
    premium: Money,
    max_payout: Money,
    additional_contributions: Option<String>,
    pool_logic: Option<String>,
    oracle: Option<Oracle>,
    pool_closes_at: Option<DateTime<Utc>>,
    event_ends_at: Option<DateTime<Utc>>,
    icon: Icon,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InsuranceEpisode {
    /// Creates an episode from its required fields. Optional fields start
    /// unset; `created_at` and `updated_at` are both set to now.
    #[must_use]
    pub fn new(draft: EpisodeDraft) -> Self {
        let now = Utc::now();
        Self {
            id: draft.id,
            category: draft.category,
            status: draft.status,
            title: draft.title,
            subtitle: None,
            event_window: draft.event_window,
            trigger_condition: draft.trigger_condition,
            premium: draft.premium,
            max_payout: draft.max_payout,
            additional_contributions: None,
            pool_logic: None,
            oracle: None,
            pool_closes_at: None,
            event_ends_at: None,
            icon: draft.icon,
            created_at: now,
            updated_at: now,
        }
    }

    /// Episode identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Insured event kind.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional subtitle.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Coverage window text.
    #[must_use]
    pub fn event_window(&self) -> &str {
        &self.event_window
    }

    /// Trigger rule text.
    #[must_use]
    pub fn trigger_condition(&self) -> &str {
        &self.trigger_condition
    }

    /// Premium amount and currency.
    #[must_use]
    pub const fn premium(&self) -> &Money {
        &self.premium
    }

    /// Maximum payout amount and currency.
    #[must_use]
    pub const fn max_payout(&self) -> &Money {
        &self.max_payout
    }

    /// Optional description of contributions beyond the premium.
    #[must_use]
    pub fn additional_contributions(&self) -> Option<&str> {
        self.additional_contributions.as_deref()
    }

    /// Optional description of how the pool distributes funds.
    #[must_use]
    pub fn pool_logic(&self) -> Option<&str> {
        self.pool_logic.as_deref()
    }

    /// Optional resolution oracle.
    #[must_use]
    pub const fn oracle(&self) -> Option<&Oracle> {
        self.oracle.as_ref()
    }

    /// When the pool stops accepting members.
    #[must_use]
    pub const fn pool_closes_at(&self) -> Option<DateTime<Utc>> {
        self.pool_closes_at
    }

    /// When the insured event window ends.
    #[must_use]
    pub const fn event_ends_at(&self) -> Option<DateTime<Utc>> {
        self.event_ends_at
    }

    /// Display icon.
    #[must_use]
    pub const fn icon(&self) -> Icon {
        self.icon
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last mutation.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the subtitle.
    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = Some(subtitle.into());
        self.updated_at = touch(self.created_at);
    }

    /// Sets the additional-contributions text.
    pub fn set_additional_contributions(&mut self, text: impl Into<String>) {
        self.additional_contributions = Some(text.into());
        self.updated_at = touch(self.created_at);
    }

    /// Sets the pool-logic text.
    pub fn set_pool_logic(&mut self, text: impl Into<String>) {
        self.pool_logic = Some(text.into());
        self.updated_at = touch(self.created_at);
    }

    /// Sets the resolution oracle.
    pub fn set_oracle(&mut self, oracle: Oracle) {
        self.oracle = Some(oracle);
        self.updated_at = touch(self.created_at);
    }

    /// Sets when the pool closes.
    pub fn set_pool_closes_at(&mut self, at: DateTime<Utc>) {
        self.pool_closes_at = Some(at);
        self.updated_at = touch(self.created_at);
    }

    /// Sets when the event window ends.
    pub fn set_event_ends_at(&mut self, at: DateTime<Utc>) {
        self.event_ends_at = Some(at);
        self.updated_at = touch(self.created_at);
    }

    /// Moves the episode to `status`. No transition table is enforced.
    pub fn update_status(&mut self, status: EpisodeStatus) {
        self.status = status;
        self.updated_at = touch(self.created_at);
    }
}

impl Entity for InsuranceEpisode {
    const KIND: &'static str = "episode";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn draft(id: &str, status: EpisodeStatus, category: Category) -> EpisodeDraft {
        EpisodeDraft {
            id: id.to_string(),
            category,
            status,
            title: format!("{id} cover"),
            event_window: "2025.01.15 14:00 - 2025.01.15 18:00".to_string(),
            trigger_condition: "Departure delayed 2h or more".to_string(),
            premium: Money::new(25.0, "USDC"),
            max_payout: Money::new(300.0, "USDC"),
            icon: Icon::Plane,
        }
    }

    #[test]
    fn new_episode_has_no_optional_fields() {
        let ep = InsuranceEpisode::new(draft(
            "ke902",
            EpisodeStatus::Recruiting,
            Category::FlightDelay,
        ));
        assert_eq!(ep.id(), "ke902");
        assert!(ep.subtitle().is_none());
        assert!(ep.oracle().is_none());
        assert!(ep.pool_logic().is_none());
        assert_eq!(ep.created_at(), ep.updated_at());
    }

    #[test]
    fn setters_refresh_updated_at() {
        let mut ep = InsuranceEpisode::new(draft(
            "ke902",
            EpisodeStatus::Recruiting,
            Category::FlightDelay,
        ));
        let before = ep.updated_at();
        ep.set_oracle(Oracle::new("FlightStats API", "24h after event"));
        assert!(ep.updated_at() >= before);
        assert!(ep.updated_at() >= ep.created_at());
        assert_eq!(
            ep.oracle().map(|o| o.data_source.as_str()),
            Some("FlightStats API")
        );
    }

    #[test]
    fn update_status_allows_any_transition() {
        let mut ep = InsuranceEpisode::new(draft(
            "ke902",
            EpisodeStatus::Completed,
            Category::FlightDelay,
        ));
        ep.update_status(EpisodeStatus::Recruiting);
        assert_eq!(ep.status(), EpisodeStatus::Recruiting);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            EpisodeStatus::Recruiting,
            EpisodeStatus::Active,
            EpisodeStatus::Settling,
            EpisodeStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<EpisodeStatus>(), Ok(status));
        }
        assert!("closed".parse::<EpisodeStatus>().is_err());
    }
}
