use std::collections::HashSet;

use sqlx::{FromRow, SqliteConnection};
use time::OffsetDateTime;

use crate::models::artist::Artist;
use crate::models::venue::Venue;
use crate::util::display_datetime;

/// A scheduled performance of one artist at one venue.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Show {
    /// The ID of the show
    pub id: i64,
    /// When the show starts (UTC)
    pub start_time: OffsetDateTime,
    /// The artist performing
    pub artist_id: i64,
    /// Where the show is held
    pub venue_id: i64,
}

/// A show joined with the names and pictures the listings display.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ShowListing {
    pub id: i64,
    pub start_time: OffsetDateTime,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
}

impl ShowListing {
    pub fn start_time_display(&self) -> String {
        display_datetime(self.start_time)
    }
}

pub trait StartsAt {
    fn start_time(&self) -> OffsetDateTime;

    /// Shows starting exactly at `now` count as upcoming.
    fn is_upcoming(&self, now: OffsetDateTime) -> bool {
        self.start_time() >= now
    }
}

impl StartsAt for Show {
    fn start_time(&self) -> OffsetDateTime {
        self.start_time
    }
}

impl StartsAt for ShowListing {
    fn start_time(&self) -> OffsetDateTime {
        self.start_time
    }
}

/// Shows split around a reference time, each half in its input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<S> {
    pub past: Vec<S>,
    pub upcoming: Vec<S>,
}

impl<S: StartsAt> Timeline<S> {
    pub fn partition(shows: impl IntoIterator<Item = S>, now: OffsetDateTime) -> Self {
        let (upcoming, past) = shows.into_iter().partition(|show| show.is_upcoming(now));

        Self { past, upcoming }
    }
}

const LISTING_QUERY: &str = "
    SELECT shows.id, shows.start_time,
           artists.id AS artist_id, artists.name AS artist_name,
           artists.image_link AS artist_image_link,
           venues.id AS venue_id, venues.name AS venue_name,
           venues.image_link AS venue_image_link
    FROM shows
    JOIN artists ON artists.id = shows.artist_id
    JOIN venues ON venues.id = shows.venue_id";

impl Show {
    pub async fn with_id_opt(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<Option<Self>> {
        sqlx::query_as("SELECT id, start_time, artist_id, venue_id FROM shows WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as("SELECT id, start_time, artist_id, venue_id FROM shows ORDER BY id")
            .fetch_all(conn)
            .await
    }

    pub async fn listings(conn: &mut SqliteConnection) -> sqlx::Result<Vec<ShowListing>> {
        sqlx::query_as(&format!("{} ORDER BY shows.id", LISTING_QUERY))
            .fetch_all(conn)
            .await
    }

    pub async fn listings_for_venue(
        venue_id: i64,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Vec<ShowListing>> {
        sqlx::query_as(&format!(
            "{} WHERE shows.venue_id = ? ORDER BY shows.start_time, shows.id",
            LISTING_QUERY
        ))
        .bind(venue_id)
        .fetch_all(conn)
        .await
    }

    pub async fn listings_for_artist(
        artist_id: i64,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Vec<ShowListing>> {
        sqlx::query_as(&format!(
            "{} WHERE shows.artist_id = ? ORDER BY shows.start_time, shows.id",
            LISTING_QUERY
        ))
        .bind(artist_id)
        .fetch_all(conn)
        .await
    }

    /// Shows whose artist or venue name contains `term`, in ID order.
    pub async fn search(term: &str, conn: &mut SqliteConnection) -> sqlx::Result<Vec<ShowListing>> {
        let artist_ids = Artist::search(term, &mut *conn)
            .await?
            .into_iter()
            .map(|artist| artist.id)
            .collect();
        let venue_ids = Venue::search(term, &mut *conn)
            .await?
            .into_iter()
            .map(|venue| venue.id)
            .collect();

        Ok(involving(Self::listings(conn).await?, &artist_ids, &venue_ids))
    }

    pub async fn create(new_show: &NewShow, conn: &mut SqliteConnection) -> sqlx::Result<i64> {
        let result =
            sqlx::query("INSERT INTO shows (start_time, artist_id, venue_id) VALUES (?, ?, ?)")
                .bind(new_show.start_time)
                .bind(new_show.artist_id)
                .bind(new_show.venue_id)
                .execute(conn)
                .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(id: i64, update: &NewShow, conn: &mut SqliteConnection) -> sqlx::Result<()> {
        let result = sqlx::query(
            "UPDATE shows SET start_time = ?, artist_id = ?, venue_id = ? WHERE id = ?",
        )
        .bind(update.start_time)
        .bind(update.artist_id)
        .bind(update.venue_id)
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    pub async fn delete(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM shows WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}

/// Keeps the listings that feature any of `artist_ids` or take place at any of `venue_ids`.
pub fn involving(
    listings: Vec<ShowListing>,
    artist_ids: &HashSet<i64>,
    venue_ids: &HashSet<i64>,
) -> Vec<ShowListing> {
    listings
        .into_iter()
        .filter(|show| artist_ids.contains(&show.artist_id) || venue_ids.contains(&show.venue_id))
        .collect()
}

/// A validated show submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use time::Duration;

    use super::*;

    fn show(id: i64, start_time: OffsetDateTime) -> Show {
        Show {
            id,
            start_time,
            artist_id: 1,
            venue_id: 1,
        }
    }

    #[test]
    fn every_show_lands_in_exactly_one_half() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let shows: Vec<Show> = (-3..=3)
            .map(|offset| show(offset + 10, now + Duration::hours(offset)))
            .collect();

        let timeline = Timeline::partition(shows.clone(), now);

        assert_eq!(timeline.past.len() + timeline.upcoming.len(), shows.len());
        for show in &shows {
            let in_past = timeline.past.contains(show);
            let in_upcoming = timeline.upcoming.contains(show);
            assert!(in_past != in_upcoming, "show {} classified twice or never", show.id);
        }
    }

    #[test]
    fn a_show_starting_now_is_upcoming() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let timeline = Timeline::partition(vec![show(1, now)], now);

        assert!(timeline.past.is_empty());
        assert_eq!(timeline.upcoming, vec![show(1, now)]);
    }

    #[test]
    fn partition_keeps_input_order() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let shows = vec![
            show(1, now + Duration::days(2)),
            show(2, now - Duration::days(1)),
            show(3, now + Duration::days(1)),
            show(4, now - Duration::days(3)),
        ];

        let timeline = Timeline::partition(shows, now);

        let ids = |shows: &[Show]| shows.iter().map(|show| show.id).collect::<Vec<_>>();
        assert_eq!(ids(&timeline.upcoming), [1, 3]);
        assert_eq!(ids(&timeline.past), [2, 4]);
    }

    #[test]
    fn search_takes_the_union_of_artist_and_venue_matches() {
        let listing = |id, artist_id, venue_id| ShowListing {
            id,
            start_time: datetime!(2024-06-01 12:00 UTC),
            artist_id,
            artist_name: format!("artist {}", artist_id),
            artist_image_link: None,
            venue_id,
            venue_name: format!("venue {}", venue_id),
            venue_image_link: None,
        };
        let listings = vec![listing(1, 1, 1), listing(2, 2, 2), listing(3, 3, 1), listing(4, 3, 3)];

        let found = involving(listings, &HashSet::from([2]), &HashSet::from([1]));

        let ids: Vec<_> = found.iter().map(|show| show.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn classification_moves_with_the_reference_time() {
        let start = datetime!(2024-06-01 12:00 UTC);
        let shows = vec![show(1, start)];

        let before = Timeline::partition(shows.clone(), start - Duration::seconds(1));
        let after = Timeline::partition(shows, start + Duration::seconds(1));

        assert_eq!(before.upcoming.len(), 1);
        assert_eq!(after.past.len(), 1);
    }
}
