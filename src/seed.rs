//! Demo catalogue loaded at startup when `SEED_MOCK_DATA` is enabled.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{
    Category, EpisodeDraft, EpisodeStatus, Icon, InsuranceEpisode, Money, Oracle, Pool, PoolDraft,
    PoolStatus, Transaction, TransactionDraft, TransactionStatus, TransactionType,
};
use crate::error::GatewayError;
use crate::repository::{EpisodeRepository, PoolRepository, TransactionRepository};

const POOL_LOGIC: &str = "Homogeneous risk pool. Surplus returned pro-rata to members.";

fn utc(year: i32, month: u32, day: u32, hour: u32) -> Result<DateTime<Utc>, GatewayError> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .ok_or_else(|| GatewayError::Internal(format!("invalid seed date {year}-{month}-{day}")))
}

/// Builds the demo episodes.
///
/// # Errors
///
/// Returns [`GatewayError::Internal`] if a seed date is invalid.
pub fn mock_episodes() -> Result<Vec<InsuranceEpisode>, GatewayError> {
    let mut ke902 = InsuranceEpisode::new(EpisodeDraft {
        id: "ke902".to_string(),
        category: Category::FlightDelay,
        status: EpisodeStatus::Recruiting,
        title: "KE902 flight delay cover".to_string(),
        event_window: "2025.01.15 14:00 - 2025.01.15 18:00".to_string(),
        trigger_condition: "Departure delayed by 2 hours or more".to_string(),
        premium: Money::new(25.0, "USDC"),
        max_payout: Money::new(300.0, "USDC"),
        icon: Icon::Plane,
    });
    ke902.set_subtitle("ICN-NRT departures");
    ke902.set_additional_contributions("none");
    ke902.set_pool_logic(POOL_LOGIC);
    ke902.set_oracle(Oracle::new("FlightStats API", "24 hours after the event ends"));
    ke902.set_pool_closes_at(utc(2025, 1, 15, 12)?);
    ke902.set_event_ends_at(utc(2025, 1, 15, 18)?);

    let mut typhoon = InsuranceEpisode::new(EpisodeDraft {
        id: "jejuTyphoon".to_string(),
        category: Category::Weather,
        status: EpisodeStatus::Recruiting,
        title: "Jeju typhoon cancellation cover".to_string(),
        event_window: "2025.08.01 - 2025.08.31".to_string(),
        trigger_condition: "Automatic payout when a typhoon warning cancels the flight"
            .to_string(),
        premium: Money::new(50.0, "USDC"),
        max_payout: Money::new(500.0, "USDC"),
        icon: Icon::Cloud,
    });
    typhoon.set_subtitle("Typhoon-affected Jeju flights");
    typhoon.set_additional_contributions("none");
    typhoon.set_pool_logic(POOL_LOGIC);
    typhoon.set_oracle(Oracle::new(
        "Korea Meteorological Administration API",
        "48 hours after the event ends",
    ));
    typhoon.set_pool_closes_at(utc(2025, 8, 31, 12)?);
    typhoon.set_event_ends_at(utc(2025, 9, 1, 0)?);

    Ok(vec![ke902, typhoon])
}

struct PoolSeed {
    draft: PoolDraft,
    members: u32,
    contribution: f64,
}

impl PoolSeed {
    fn build(self) -> Pool {
        let mut pool = Pool::new(self.draft);
        for _ in 0..self.members {
            pool.add_member(self.contribution);
        }
        pool
    }
}

#[allow(clippy::too_many_arguments)]
fn pool_draft(
    id: &str,
    event_id: &str,
    category: Category,
    status: PoolStatus,
    title: &str,
    description: &str,
    premium: f64,
    max_payout: f64,
    pool_target: f64,
    end_date: DateTime<Utc>,
    icon: Icon,
) -> PoolDraft {
    PoolDraft {
        id: id.to_string(),
        event_id: event_id.to_string(),
        category,
        status,
        title: title.to_string(),
        description: description.to_string(),
        coverage_condition: match category {
            Category::TripCancel => "Automatic payout on flight or lodging cancellation",
            Category::Weather => "Automatic payout when a typhoon warning cancels the flight",
            Category::FlightDelay => "Automatic payout on a departure delay of 2 hours or more",
        }
        .to_string(),
        premium: Money::new(premium, "KRW"),
        max_payout: Money::new(max_payout, "KRW"),
        pool_target,
        end_date,
        icon,
    }
}

/// Builds the demo pools with their members already joined.
///
/// # Errors
///
/// Returns [`GatewayError::Internal`] if a seed date is invalid.
pub fn mock_pools() -> Result<Vec<Pool>, GatewayError> {
    let seeds = [
        PoolSeed {
            draft: pool_draft(
                "1",
                "ke902",
                Category::FlightDelay,
                PoolStatus::Recruiting,
                "Incheon-Tokyo flight delay cover",
                "Covers ICN-NRT departures on 15 January 2025 delayed by 2 hours or more",
                15_000.0,
                300_000.0,
                3_000_000.0,
                utc(2025, 1, 15, 0)?,
                Icon::Plane,
            ),
            members: 127,
            contribution: 15_000.0,
        },
        PoolSeed {
            draft: pool_draft(
                "2",
                "jejuTyphoon",
                Category::Weather,
                PoolStatus::Recruiting,
                "Jeju typhoon cancellation cover",
                "Covers Jeju summer trips in August 2025 cancelled by typhoons",
                25_000.0,
                500_000.0,
                5_000_000.0,
                utc(2025, 8, 31, 0)?,
                Icon::Cloud,
            ),
            members: 89,
            contribution: 25_000.0,
        },
        PoolSeed {
            draft: pool_draft(
                "3",
                "gimpoJeju",
                Category::FlightDelay,
                PoolStatus::Active,
                "Gimpo-Jeju flight delay cover",
                "Covers domestic GMP-CJU departures in January 2025 delayed by 2 hours or more",
                10_000.0,
                200_000.0,
                3_000_000.0,
                utc(2025, 1, 31, 0)?,
                Icon::Plane,
            ),
            members: 256,
            contribution: 10_000.0,
        },
        PoolSeed {
            draft: pool_draft(
                "4",
                "tokyoCherry",
                Category::TripCancel,
                PoolStatus::Settling,
                "Tokyo cherry blossom trip cover",
                "Settlement in progress for April 2024 Tokyo cherry blossom trip cancellations",
                20_000.0,
                400_000.0,
                6_240_000.0,
                utc(2024, 4, 15, 0)?,
                Icon::Suitcase,
            ),
            members: 312,
            contribution: 20_000.0,
        },
    ];
    Ok(seeds.into_iter().map(PoolSeed::build).collect())
}

struct TransactionSeed {
    id: &'static str,
    tx_type: TransactionType,
    hash: &'static str,
    address: &'static str,
    amount: &'static str,
    minutes_ago: i64,
    block_number: u64,
    flight: Option<&'static str>,
    event_id: &'static str,
    pool_id: &'static str,
}

/// Builds the demo transactions, timestamped relative to `now`.
#[must_use]
pub fn mock_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    let seeds = [
        TransactionSeed {
            id: "tx_001",
            tx_type: TransactionType::Purchase,
            hash: "0x1234567890abcdef1234567890abcdef12345678",
            address: "0xabcdef1234567890abcdef1234567890abcdef12",
            amount: "0.0125",
            minutes_ago: 5,
            block_number: 12_345_678,
            flight: Some("KE123"),
            event_id: "ke902",
            pool_id: "1",
        },
        TransactionSeed {
            id: "tx_002",
            tx_type: TransactionType::Claim,
            hash: "0x2345678901bcdef2345678901bcdef23456789",
            address: "0xbcdef12345678901bcdef12345678901bcdef23",
            amount: "0.0300",
            minutes_ago: 10,
            block_number: 12_345_677,
            flight: Some("BA321"),
            event_id: "jejuTyphoon",
            pool_id: "2",
        },
        TransactionSeed {
            id: "tx_003",
            tx_type: TransactionType::Payout,
            hash: "0x3456789012cdef3456789012cdef34567890",
            address: "0xcdef123456789012cdef123456789012cdef34",
            amount: "0.0500",
            minutes_ago: 15,
            block_number: 12_345_676,
            flight: Some("EK111"),
            event_id: "ke902",
            pool_id: "1",
        },
        TransactionSeed {
            id: "tx_004",
            tx_type: TransactionType::Stake,
            hash: "0x4567890123def4567890123def45678901",
            address: "0xdef1234567890123def1234567890123def45",
            amount: "1.5000",
            minutes_ago: 20,
            block_number: 12_345_675,
            flight: None,
            event_id: "ke902",
            pool_id: "1",
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let mut tx = Transaction::new(TransactionDraft {
                id: seed.id.to_string(),
                tx_type: seed.tx_type,
                hash: seed.hash.to_string(),
                address: seed.address.to_string(),
                amount: seed.amount.to_string(),
                currency: "MNT".to_string(),
                timestamp: now - Duration::minutes(seed.minutes_ago),
                block_number: seed.block_number,
                status: TransactionStatus::Confirmed,
            });
            if let Some(flight) = seed.flight {
                tx.set_flight(flight);
            }
            tx.set_event_id(seed.event_id);
            tx.set_pool_id(seed.pool_id);
            tx
        })
        .collect()
}

/// Loads the demo catalogue into the repositories.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] if a repository rejects the batch
/// and [`GatewayError::Internal`] if a seed date is invalid.
pub async fn seed(
    episodes: &EpisodeRepository,
    pools: &PoolRepository,
    transactions: &TransactionRepository,
) -> Result<(), GatewayError> {
    episodes.initialize(mock_episodes()?).await?;
    pools.initialize(mock_pools()?).await?;
    transactions.initialize(mock_transactions(Utc::now())).await?;
    tracing::info!(
        episodes = episodes.find_all().await.len(),
        pools = pools.find_all().await.len(),
        transactions = transactions.find_all().await.len(),
        "mock data seeded"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_every_store() {
        let episodes = EpisodeRepository::new();
        let pools = PoolRepository::new();
        let transactions = TransactionRepository::new();
        let Ok(()) = seed(&episodes, &pools, &transactions).await else {
            panic!("seed failed");
        };

        assert_eq!(episodes.find_all().await.len(), 2);
        assert_eq!(transactions.find_all().await.len(), 4);

        let members: Vec<u32> = pools.find_all().await.iter().map(Pool::members).collect();
        assert_eq!(members, vec![127, 89, 256, 312]);

        let Some(pool) = pools.find_by_event_id("ke902").await else {
            panic!("ke902 pool missing");
        };
        assert!((pool.pool_size() - 1_905_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn transactions_are_newest_first_by_age() {
        let now = Utc::now();
        let txs = mock_transactions(now);
        assert!(txs.windows(2).all(|w| match w {
            [a, b] => a.timestamp() > b.timestamp(),
            _ => true,
        }));
        assert!(txs.iter().all(|t| t.timestamp() < now));
    }
}
