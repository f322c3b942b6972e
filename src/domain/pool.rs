//! Funding pool backing one episode.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{Category, Icon, Money, UnknownVariant};
use super::entity_store::{Entity, touch};

/// Lifecycle stage of a pool. Pools have no `completed` stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    /// Accepting members.
    Recruiting,
    /// Coverage running.
    Active,
    /// Paying out.
    Settling,
}

impl PoolStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::Active => "active",
            Self::Settling => "settling",
        }
    }
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoolStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recruiting" => Ok(Self::Recruiting),
            "active" => Ok(Self::Active),
            "settling" => Ok(Self::Settling),
            other => Err(UnknownVariant::new("pool status", other)),
        }
    }
}

/// Required fields for creating a [`Pool`].
#[derive(Debug, Clone)]
pub struct PoolDraft {
    /// Pool identifier.
    pub id: String,
    /// Episode this pool funds.
    pub event_id: String,
    /// Insured event kind.
    pub category: Category,
    /// Initial status.
    pub status: PoolStatus,
    /// Display title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Human-readable coverage rule.
    pub coverage_condition: String,
    /// Premium each member pays.
    pub premium: Money,
    /// Maximum payout per member.
    pub max_payout: Money,
    /// Funding target.
    pub pool_target: f64,
    /// When the pool ends.
    pub end_date: DateTime<Utc>,
    /// Display icon.
    pub icon: Icon,
}

/// Aggregate root for a funding pool.
///
/// Membership only grows: [`Pool::add_member`] bumps `members` and
/// `pool_size` together.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    id: String,
    event_id: String,
    category: Category,
    status: PoolStatus,
    title: String,
    description: String,
    coverage_condition: String,
    premium: Money,
    max_payout: Money,
    members: u32,
    pool_size: f64,
    pool_target: f64,
    end_date: DateTime<Utc>,
    icon: Icon,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Pool {
    /// Creates an empty pool (no members, zero size).
    #[must_use]
    pub fn new(draft: PoolDraft) -> Self {
        let now = Utc::now();
        Self {
            id: draft.id,
            event_id: draft.event_id,
            category: draft.category,
            status: draft.status,
            title: draft.title,
            description: draft.description,
            coverage_condition: draft.coverage_condition,
            premium: draft.premium,
            max_payout: draft.max_payout,
            members: 0,
            pool_size: 0.0,
            pool_target: draft.pool_target,
            end_date: draft.end_date,
            icon: draft.icon,
            created_at: now,
            updated_at: now,
        }
    }

    /// Pool identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Episode this pool funds.
    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Insured event kind.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        self.status
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Longer description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Coverage rule text.
    #[must_use]
    pub fn coverage_condition(&self) -> &str {
        &self.coverage_condition
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

    /// Number of members who joined.
    #[must_use]
    pub const fn members(&self) -> u32 {
        self.members
    }

    /// Sum of all member contributions.
    #[must_use]
    pub const fn pool_size(&self) -> f64 {
        self.pool_size
    }

    /// Funding target.
    #[must_use]
    pub const fn pool_target(&self) -> f64 {
        self.pool_target
    }

    /// When the pool ends.
    #[must_use]
    pub const fn end_date(&self) -> DateTime<Utc> {
        self.end_date
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

    /// Records a new member contributing `contribution`.
    ///
    /// Callers validate that `contribution` is finite and non-negative;
    /// see `PoolRepository::add_member`.
    pub fn add_member(&mut self, contribution: f64) {
        self.members = self.members.saturating_add(1);
        self.pool_size += contribution;
        self.updated_at = touch(self.created_at);
    }

    /// Moves the pool to `status`.
    pub fn update_status(&mut self, status: PoolStatus) {
        self.status = status;
        self.updated_at = touch(self.created_at);
    }
}

impl Entity for Pool {
    const KIND: &'static str = "pool";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::TimeZone;

    use super::*;

    pub(crate) fn draft(id: &str, event_id: &str, status: PoolStatus) -> PoolDraft {
        PoolDraft {
            id: id.to_string(),
            event_id: event_id.to_string(),
            category: Category::FlightDelay,
            status,
            title: format!("pool {id}"),
            description: "ICN-NRT departures".to_string(),
            coverage_condition: "Delay of 2h or more".to_string(),
            premium: Money::new(15_000.0, "KRW"),
            max_payout: Money::new(300_000.0, "KRW"),
            pool_target: 3_000_000.0,
            end_date: Utc
                .with_ymd_and_hms(2025, 1, 15, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            icon: Icon::Plane,
        }
    }

    #[test]
    fn new_pool_is_empty() {
        let pool = Pool::new(draft("1", "ke902", PoolStatus::Recruiting));
        assert_eq!(pool.members(), 0);
        assert!(pool.pool_size().abs() < f64::EPSILON);
    }

    #[test]
    fn add_member_bumps_count_and_size() {
        let mut pool = Pool::new(draft("1", "ke902", PoolStatus::Recruiting));
        pool.add_member(15_000.0);
        pool.add_member(5_000.0);
        assert_eq!(pool.members(), 2);
        assert!((pool.pool_size() - 20_000.0).abs() < f64::EPSILON);
        assert!(pool.updated_at() >= pool.created_at());
    }

    #[test]
    fn status_parse_rejects_completed() {
        assert_eq!("settling".parse(), Ok(PoolStatus::Settling));
        assert!("completed".parse::<PoolStatus>().is_err());
    }
}
