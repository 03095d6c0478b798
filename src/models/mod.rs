use std::collections::HashMap;

use time::OffsetDateTime;

use self::show::{Show, StartsAt};

pub mod area;
pub mod artist;
pub mod show;
pub mod venue;

/// One row of a venue or artist search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Whether `name` contains `term`, ignoring case. The term is matched as typed,
/// surrounding spaces included, and an empty term matches everything.
pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Counts upcoming shows per owner, keyed by whatever `owner` picks out of each show.
pub fn upcoming_counts(
    shows: &[Show],
    now: OffsetDateTime,
    owner: impl Fn(&Show) -> i64,
) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|show| show.is_upcoming(now)) {
        *counts.entry(owner(show)).or_insert(0) += 1;
    }

    counts
}
