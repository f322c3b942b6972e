//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Collaborator settings are optional;
//! when they are missing the gateway still starts and the affected
//! endpoints report the gap.

use std::net::SocketAddr;
use std::time::Duration;

use crate::chain::etherscan::{DEFAULT_BASE_URL, DEFAULT_CHAIN_ID, EtherscanSettings};
use crate::domain::NetworkProfile;
use crate::error::GatewayError;
use crate::persistence::supabase::SupabaseSettings;
use crate::repository::user_episode_repository::DEFAULT_TABLE;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Address of the episode contract factory.
    pub episode_factory_address: Option<String>,

    /// Block explorer settings; `None` without `ETHERSCAN_API_KEY`.
    pub etherscan: Option<EtherscanSettings>,

    /// Hosted database settings; `None` unless both URL and key are set.
    pub supabase: Option<SupabaseSettings>,

    /// Table holding user/episode associations.
    pub user_episodes_table: String,

    /// Timeout in seconds for each inbound request.
    pub request_timeout_secs: u64,

    /// Whether to load the demo catalogue at startup.
    pub seed_mock_data: bool,

    /// Network figures reported by the statistics endpoints.
    pub network: NetworkProfile,

    /// Log output format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if `LISTEN_ADDR` or `PORT` is set
    /// but cannot be parsed.
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GatewayConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = match (get("LISTEN_ADDR"), get("PORT")) {
            (Some(addr), _) => addr
                .parse()
                .map_err(|e| GatewayError::Config(format!("invalid LISTEN_ADDR {addr}: {e}")))?,
            (None, Some(port)) => format!("0.0.0.0:{port}")
                .parse()
                .map_err(|e| GatewayError::Config(format!("invalid PORT {port}: {e}")))?,
            (None, None) => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let client_timeout = Duration::from_secs(parse_or(&get, "HTTP_CLIENT_TIMEOUT_SECS", 30));

        let etherscan = get("ETHERSCAN_API_KEY").map(|api_key| EtherscanSettings {
            api_key,
            chain_id: get("ETHERSCAN_CHAIN_ID").unwrap_or_else(|| DEFAULT_CHAIN_ID.to_string()),
            base_url: get("ETHERSCAN_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: client_timeout,
        });

        let supabase = match (get("SUPABASE_PROJECT_URL"), get("SUPABASE_API_KEY")) {
            (Some(project_url), Some(api_key)) => Some(SupabaseSettings {
                project_url,
                api_key,
                timeout: client_timeout,
            }),
            _ => None,
        };

        let network = NetworkProfile {
            network: get("NETWORK_NAME").unwrap_or_else(|| "Mantle Network".to_string()),
            gas_price: get("GAS_PRICE").unwrap_or_else(|| "0.02".to_string()),
            gas_unit: get("GAS_UNIT").unwrap_or_else(|| "gwei".to_string()),
            default_currency: get("STATS_DEFAULT_CURRENCY").unwrap_or_else(|| "USD".to_string()),
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            episode_factory_address: get("EPISODE_CONTRACT_FACTORY"),
            etherscan,
            supabase,
            user_episodes_table: get("USER_EPISODES_TABLE")
                .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            request_timeout_secs: parse_or(&get, "REQUEST_TIMEOUT_SECS", 60),
            seed_mock_data: parse_bool_or(&get, "SEED_MOCK_DATA", true),
            network,
            log_format,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_or<T, G>(get: &G, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `true`/`1`/`false`/`0`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool_or<G>(get: &G, key: &str, default: bool) -> bool
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<GatewayConfig, GatewayError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let Ok(config) = load(&[]) else {
            panic!("defaults should load");
        };
        assert_eq!(config.listen_addr.port(), 3000);
        assert!(config.etherscan.is_none());
        assert!(config.supabase.is_none());
        assert!(config.episode_factory_address.is_none());
        assert_eq!(config.user_episodes_table, "user_episodes");
        assert_eq!(config.request_timeout_secs, 60);
        assert!(config.seed_mock_data);
        assert_eq!(config.network.network, "Mantle Network");
        assert_eq!(config.network.default_currency, "USD");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn port_is_used_without_listen_addr() {
        let Ok(config) = load(&[("PORT", "8080")]) else {
            panic!("config should load");
        };
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn invalid_listen_addr_is_rejected() {
        assert!(matches!(
            load(&[("LISTEN_ADDR", "nowhere")]),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn etherscan_settings_follow_api_key() {
        let Ok(config) = load(&[
            ("ETHERSCAN_API_KEY", "k"),
            ("ETHERSCAN_CHAIN_ID", "5000"),
            ("HTTP_CLIENT_TIMEOUT_SECS", "7"),
        ]) else {
            panic!("config should load");
        };
        let Some(etherscan) = config.etherscan else {
            panic!("etherscan settings expected");
        };
        assert_eq!(etherscan.chain_id, "5000");
        assert_eq!(etherscan.base_url, DEFAULT_BASE_URL);
        assert_eq!(etherscan.timeout, Duration::from_secs(7));
    }

    #[test]
    fn supabase_needs_url_and_key() {
        let Ok(partial) = load(&[("SUPABASE_PROJECT_URL", "https://x.supabase.co")]) else {
            panic!("config should load");
        };
        assert!(partial.supabase.is_none());

        let Ok(full) = load(&[
            ("SUPABASE_PROJECT_URL", "https://x.supabase.co"),
            ("SUPABASE_API_KEY", "anon"),
        ]) else {
            panic!("config should load");
        };
        assert!(full.supabase.is_some());
    }

    #[test]
    fn flags_and_formats() {
        let Ok(config) = load(&[
            ("SEED_MOCK_DATA", "FALSE"),
            ("LOG_FORMAT", "json"),
            ("EPISODE_CONTRACT_FACTORY", ""),
        ]) else {
            panic!("config should load");
        };
        assert!(!config.seed_mock_data);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.episode_factory_address.is_none());
    }
}
