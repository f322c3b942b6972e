//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Oracle;

/// Page number reported by the catalogue list endpoints.
pub const LIST_PAGE: u32 = 1;

/// Page size reported by the catalogue list endpoints.
pub const LIST_LIMIT: u32 = 20;

/// Placeholder shown for oracle fields that are not configured.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder shown for optional rule texts that are not set.
pub const NONE_TEXT: &str = "none";

/// Status/category filter for catalogue list endpoints.
///
/// Values are kept as sent; a value that names no known variant matches
/// nothing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Lifecycle status (e.g. `recruiting`).
    #[serde(default)]
    pub status: Option<String>,
    /// Category (e.g. `flightDelay`).
    #[serde(default)]
    pub category: Option<String>,
}

/// Oracle projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OracleDto {
    /// Where the outcome is read from.
    pub data_source: String,
    /// When the outcome is read.
    pub resolution_time: String,
}

impl OracleDto {
    /// Oracle shown when none is configured.
    #[must_use]
    pub fn not_available() -> Self {
        Self {
            data_source: NOT_AVAILABLE.to_string(),
            resolution_time: NOT_AVAILABLE.to_string(),
        }
    }
}

impl From<&Oracle> for OracleDto {
    fn from(oracle: &Oracle) -> Self {
        Self {
            data_source: oracle.data_source.clone(),
            resolution_time: oracle.resolution_time.clone(),
        }
    }
}
