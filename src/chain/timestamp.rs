//! Normalisation of explorer numeric strings.
//!
//! The explorer reports block numbers and timestamps either as `0x`-prefixed
//! hex or as decimal strings, depending on the endpoint.

use chrono::DateTime;

/// Display format for normalised timestamps (UTC).
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a hex (`0x...`) or decimal string into an integer.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

/// Formats a Unix-seconds string as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// Input that does not parse, or that is out of range, is returned
/// unchanged.
#[must_use]
pub fn normalize_timestamp(raw: &str) -> String {
    parse_quantity(raw)
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map_or_else(
            || raw.to_string(),
            |at| at.format(DISPLAY_FORMAT).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_decimal_agree() {
        assert_eq!(normalize_timestamp("0x5f5e100"), "1973-03-03 09:46:40");
        assert_eq!(normalize_timestamp("100000000"), "1973-03-03 09:46:40");
    }

    #[test]
    fn epoch_formats() {
        assert_eq!(normalize_timestamp("0"), "1970-01-01 00:00:00");
    }

    #[test]
    fn garbage_passes_through() {
        assert_eq!(normalize_timestamp("yesterday"), "yesterday");
        assert_eq!(normalize_timestamp("0xzz"), "0xzz");
        assert_eq!(normalize_timestamp(""), "");
    }

    #[test]
    fn parse_quantity_handles_both_radixes() {
        assert_eq!(parse_quantity("0x10"), Some(16));
        assert_eq!(parse_quantity("16"), Some(16));
        assert_eq!(parse_quantity("-1"), None);
    }
}
