//! Static mapping from event signature hashes to event names.
//!
//! Hashes are keccak-256 of the episode contract event signatures.

/// Name reported for logs whose first topic is missing or unknown.
pub const UNKNOWN_EVENT: &str = "Unknown";

const TOPICS: &[(&str, &str)] = &[
    (
        "0x49f8fa5eee2e3f21251c2e968640dcaef35cb9332429eb059bb3cd56ddc2533d",
        "Joined",
    ),
    (
        "0xd8138f8a3f377c5259ca548e70e4c2de94f129f5a11036a15b69513cba2b426a",
        "Claimed",
    ),
    (
        "0xb94528ab6dc2c15743a47b933115b331b7beae78712677f1e345a9f1ae84bbd1",
        "SurplusWithdrawn",
    ),
    (
        "0xe8a97ea87e4388fa22d496b95a8ed5ced6717f49790318de2b928aaf37a021d8",
        "StateChanged",
    ),
    (
        "0xdabf623a6bec72ad159e2d9533e7149ec45bfc657e39f49fb6a9509852dc77dc",
        "Resolved",
    ),
    (
        "0x75cc96cb54501a78038256453f8b55cab83ae05b88fa55dfca8e8316e0cb8955",
        "EpisodeCreated",
    ),
];

/// Returns the event name for `topic`, ignoring hex case.
#[must_use]
pub fn event_name(topic: &str) -> &'static str {
    TOPICS
        .iter()
        .find(|(hash, _)| hash.eq_ignore_ascii_case(topic))
        .map_or(UNKNOWN_EVENT, |(_, name)| name)
}

/// Returns the event name for a log's topic list (first topic only).
#[must_use]
pub fn event_name_for(topics: &[String]) -> &'static str {
    topics.first().map_or(UNKNOWN_EVENT, |t| event_name(t))
}
