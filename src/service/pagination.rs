//! Offset/limit paging for the transaction feed.

/// Page size when none (or an invalid one) is requested.
pub const DEFAULT_LIMIT: usize = 20;

/// Largest accepted page size.
pub const MAX_LIMIT: usize = 100;

/// Parses a requested page size; anything outside `1..=100` yields
/// [`DEFAULT_LIMIT`].
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| (1..=MAX_LIMIT).contains(v))
        .unwrap_or(DEFAULT_LIMIT)
}

/// Parses a requested offset; anything that is not a non-negative integer
/// yields 0.
#[must_use]
pub fn parse_offset(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// Returns `items[offset..offset + limit]`, clamped to the slice bounds.
///
/// An offset at or past the end yields an empty page.
#[must_use]
pub fn page<T>(items: &[T], offset: usize, limit: usize) -> &[T] {
    let total = items.len();
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);
    items.get(start..end).unwrap_or_default()
}
