use sqlx::types::Json;
use sqlx::{FromRow, SqliteConnection};
use time::OffsetDateTime;

use crate::error::{FyyurError, FyyurResult};
use crate::models::show::Show;
use crate::models::{name_matches, upcoming_counts, SearchResult};

/// A place that hosts shows.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Venue {
    /// The ID of the venue
    pub id: i64,
    /// The name of the venue
    pub name: String,
    /// The city the venue is in
    pub city: String,
    /// The two-letter code of the state the venue is in
    pub state: String,
    /// The street address of the venue
    pub address: String,
    /// A phone number, digits only
    pub phone: String,
    /// A picture of the venue
    pub image_link: Option<String>,
    /// The venue's Facebook page
    pub facebook_link: Option<String>,
    /// The venue's own website
    pub website: Option<String>,
    /// The genres the venue books
    pub genres: Json<Vec<String>>,
    /// Whether the venue is looking for artists to book
    pub seeking_talent: bool,
    /// What kind of talent the venue is looking for
    pub seeking_description: Option<String>,
}

const COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link,
     website, genres, seeking_talent, seeking_description";

impl Venue {
    pub async fn with_id(id: i64, conn: &mut SqliteConnection) -> FyyurResult<Self> {
        Self::with_id_opt(id, conn)
            .await?
            .ok_or(FyyurError::NotFound)
    }

    pub async fn with_id_opt(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(&format!("SELECT {} FROM venues WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn exists(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(found.is_some())
    }

    pub async fn all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as(&format!("SELECT {} FROM venues ORDER BY id", COLUMNS))
            .fetch_all(conn)
            .await
    }

    /// All venues in the order the area listing walks them.
    pub async fn all_by_area(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as(&format!(
            "SELECT {} FROM venues ORDER BY city, state, id",
            COLUMNS
        ))
        .fetch_all(conn)
        .await
    }

    /// Venues whose name contains `term` in any case, by ID.
    pub async fn search(term: &str, conn: &mut SqliteConnection) -> sqlx::Result<Vec<Self>> {
        let venues = Self::all(conn).await?;

        Ok(venues
            .into_iter()
            .filter(|venue| name_matches(&venue.name, term))
            .collect())
    }

    /// Search results with each venue's upcoming show count.
    pub async fn search_results(
        term: &str,
        now: OffsetDateTime,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Vec<SearchResult>> {
        let venues = Self::search(term, &mut *conn).await?;
        let counts = upcoming_counts(&Show::all(conn).await?, now, |show| show.venue_id);

        Ok(venues
            .into_iter()
            .map(|venue| SearchResult {
                num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
                id: venue.id,
                name: venue.name,
            })
            .collect())
    }

    pub async fn create(new_venue: &NewVenue, conn: &mut SqliteConnection) -> sqlx::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO venues
                 (name, city, state, address, phone, image_link, facebook_link,
                  website, genres, seeking_talent, seeking_description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_venue.name)
        .bind(&new_venue.city)
        .bind(&new_venue.state)
        .bind(&new_venue.address)
        .bind(&new_venue.phone)
        .bind(&new_venue.image_link)
        .bind(&new_venue.facebook_link)
        .bind(&new_venue.website)
        .bind(Json(&new_venue.genres))
        .bind(new_venue.seeking_talent)
        .bind(&new_venue.seeking_description)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites the venue, failing with `RowNotFound` if it is gone.
    pub async fn update(id: i64, update: &NewVenue, conn: &mut SqliteConnection) -> sqlx::Result<()> {
        let result = sqlx::query(
            "UPDATE venues SET
                 name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
                 facebook_link = ?, website = ?, genres = ?, seeking_talent = ?,
                 seeking_description = ?
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.city)
        .bind(&update.state)
        .bind(&update.address)
        .bind(&update.phone)
        .bind(&update.image_link)
        .bind(&update.facebook_link)
        .bind(&update.website)
        .bind(Json(&update.genres))
        .bind(update.seeking_talent)
        .bind(&update.seeking_description)
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    /// Deletes the venue; the schema cascades the delete to its shows.
    pub async fn delete(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}

/// A validated venue submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}
