//! Grouping of the venue listing by city and state.

use std::collections::HashMap;

use crate::models::venue::Venue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues sharing one city and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups venues by `(city, state)`, keeping the order each pair is first seen in.
pub fn group_by_area(
    venues: impl IntoIterator<Item = Venue>,
    upcoming: &HashMap<i64, usize>,
) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let summary = VenueSummary {
            id: venue.id,
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        };

        let key = (venue.city, venue.state);
        match positions.get(&key) {
            Some(&index) => areas[index].venues.push(summary),
            None => {
                positions.insert(key.clone(), areas.len());
                areas.push(Area {
                    city: key.0,
                    state: key.1,
                    venues: vec![summary],
                });
            }
        }
    }

    areas
}
