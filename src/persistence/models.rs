//! Typed records decoded from hosted-database rows.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::Row;

/// A row of the `user_episodes` table.
///
/// Columns: `id` (int8, generated), `user`, `episode`, `progress`
/// (nullable) and `created_at` (timestamptz, generated, kept as returned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEpisode {
    /// Row id.
    #[serde(deserialize_with = "integral_id")]
    pub id: i64,
    /// User identifier (wallet address).
    pub user: String,
    /// Episode identifier (contract address).
    pub episode: String,
    /// Free-form progress marker; empty strings decode as `None`.
    #[serde(default, deserialize_with = "non_empty")]
    pub progress: Option<String>,
    /// Creation timestamp as stored.
    pub created_at: String,
}

impl UserEpisode {
    /// Decodes one row.
    ///
    /// # Errors
    ///
    /// Returns the decoder message if a required column is missing or has
    /// the wrong type.
    pub fn from_row(row: Row) -> Result<Self, String> {
        serde_json::from_value(serde_json::Value::Object(row)).map_err(|e| e.to_string())
    }
}

/// Accepts JSON integers and integral floats (some clients widen int8 to
/// a double).
fn integral_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(id) = number.as_i64() {
        return Ok(id);
    }
    match number.as_f64() {
        #[allow(clippy::cast_possible_truncation)]
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(de::Error::custom(format!("id {number} is not an integer"))),
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: serde_json::Value) -> Row {
        let serde_json::Value::Object(map) = value else {
            panic!("row must be an object");
        };
        map
    }

    #[test]
    fn decodes_integer_id() {
        let Ok(decoded) = UserEpisode::from_row(row(json!({
            "id": 7,
            "user": "alice",
            "episode": "ep1",
            "progress": null,
            "created_at": "2025-01-15T12:00:00+00:00"
        }))) else {
            panic!("row should decode");
        };
        assert_eq!(decoded.id, 7);
        assert!(decoded.progress.is_none());
    }

    #[test]
    fn decodes_integral_float_id() {
        let Ok(decoded) = UserEpisode::from_row(row(json!({
            "id": 42.0,
            "user": "alice",
            "episode": "ep1",
            "progress": "joined",
            "created_at": "2025-01-15T12:00:00+00:00"
        }))) else {
            panic!("row should decode");
        };
        assert_eq!(decoded.id, 42);
        assert_eq!(decoded.progress.as_deref(), Some("joined"));
    }

    #[test]
    fn empty_progress_is_none() {
        let Ok(decoded) = UserEpisode::from_row(row(json!({
            "id": 1,
            "user": "alice",
            "episode": "ep1",
            "progress": "",
            "created_at": "2025-01-15T12:00:00+00:00"
        }))) else {
            panic!("row should decode");
        };
        assert!(decoded.progress.is_none());
    }

    #[test]
    fn fractional_id_is_rejected() {
        let result = UserEpisode::from_row(row(json!({
            "id": 1.5,
            "user": "alice",
            "episode": "ep1",
            "created_at": "2025-01-15T12:00:00+00:00"
        })));
        assert!(result.is_err());
    }

    #[test]
    fn missing_column_is_rejected() {
        let result = UserEpisode::from_row(row(json!({
            "id": 1,
            "episode": "ep1",
            "created_at": "2025-01-15T12:00:00+00:00"
        })));
        assert!(result.is_err());
    }

    #[test]
    fn string_id_is_rejected() {
        let result = UserEpisode::from_row(row(json!({
            "id": "1",
            "user": "alice",
            "episode": "ep1",
            "created_at": "2025-01-15T12:00:00+00:00"
        })));
        assert!(result.is_err());
    }
}
