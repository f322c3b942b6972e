//! Value types shared by episodes and pools.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of real-world event an episode insures against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Flight departs late.
    FlightDelay,
    /// Adverse weather (e.g. typhoon).
    Weather,
    /// Trip is cancelled.
    TripCancel,
}

impl Category {
    /// Returns the wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FlightDelay => "flightDelay",
            Self::Weather => "weather",
            Self::TripCancel => "tripCancel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flightDelay" => Ok(Self::FlightDelay),
            "weather" => Ok(Self::Weather),
            "tripCancel" => Ok(Self::TripCancel),
            other => Err(UnknownVariant::new("category", other)),
        }
    }
}

/// Icon shown next to an episode or pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    /// Airplane.
    Plane,
    /// Cloud.
    Cloud,
    /// Suitcase.
    Suitcase,
}

/// An amount paired with its currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// Numeric amount.
    pub amount: f64,
    /// Currency code (e.g. `"USDC"`).
    pub currency: String,
}

impl Money {
    /// Creates a new `Money` value.
    #[must_use]
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownVariant {
    /// Creates a new `UnknownVariant` error.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_wire_names() {
        assert_eq!("flightDelay".parse(), Ok(Category::FlightDelay));
        assert_eq!("tripCancel".parse(), Ok(Category::TripCancel));
        assert!("flight_delay".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_camel_case() {
        let json = serde_json::to_string(&Category::FlightDelay).unwrap_or_default();
        assert_eq!(json, "\"flightDelay\"");
    }

    #[test]
    fn icon_serializes_lowercase() {
        let json = serde_json::to_string(&Icon::Suitcase).unwrap_or_default();
        assert_eq!(json, "\"suitcase\"");
    }
}
