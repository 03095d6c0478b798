use sqlx::types::Json;
use sqlx::{FromRow, SqliteConnection};
use time::OffsetDateTime;

use crate::error::{FyyurError, FyyurResult};
use crate::models::show::Show;
use crate::models::{name_matches, upcoming_counts, SearchResult};

/// A performer who plays shows at venues.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Artist {
    /// The ID of the artist
    pub id: i64,
    /// The name of the artist
    pub name: String,
    /// The city the artist is based in
    pub city: String,
    /// The two-letter code of the state the artist is based in
    pub state: String,
    /// A phone number, digits only
    pub phone: String,
    /// A picture of the artist
    pub image_link: Option<String>,
    /// The artist's Facebook page
    pub facebook_link: Option<String>,
    /// The artist's own website
    pub website: Option<String>,
    /// The genres the artist plays
    pub genres: Json<Vec<String>>,
    /// Whether the artist is looking for venues to play
    pub seeking_venue: bool,
    /// What kind of venue the artist is looking for
    pub seeking_description: Option<String>,
}

const COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link,
     website, genres, seeking_venue, seeking_description";

impl Artist {
    pub async fn with_id(id: i64, conn: &mut SqliteConnection) -> FyyurResult<Self> {
        Self::with_id_opt(id, conn)
            .await?
            .ok_or(FyyurError::NotFound)
    }

    pub async fn with_id_opt(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(&format!("SELECT {} FROM artists WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn exists(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<bool> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM artists WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(found.is_some())
    }

    pub async fn all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as(&format!("SELECT {} FROM artists ORDER BY id", COLUMNS))
            .fetch_all(conn)
            .await
    }

    pub async fn search(term: &str, conn: &mut SqliteConnection) -> sqlx::Result<Vec<Self>> {
        let artists = Self::all(conn).await?;

        Ok(artists
            .into_iter()
            .filter(|artist| name_matches(&artist.name, term))
            .collect())
    }

    pub async fn search_results(
        term: &str,
        now: OffsetDateTime,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<Vec<SearchResult>> {
        let artists = Self::search(term, &mut *conn).await?;
        let counts = upcoming_counts(&Show::all(conn).await?, now, |show| show.artist_id);

        Ok(artists
            .into_iter()
            .map(|artist| SearchResult {
                num_upcoming_shows: counts.get(&artist.id).copied().unwrap_or(0),
                id: artist.id,
                name: artist.name,
            })
            .collect())
    }

    pub async fn create(new_artist: &NewArtist, conn: &mut SqliteConnection) -> sqlx::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO artists
                 (name, city, state, phone, image_link, facebook_link, website,
                  genres, seeking_venue, seeking_description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_artist.name)
        .bind(&new_artist.city)
        .bind(&new_artist.state)
        .bind(&new_artist.phone)
        .bind(&new_artist.image_link)
        .bind(&new_artist.facebook_link)
        .bind(&new_artist.website)
        .bind(Json(&new_artist.genres))
        .bind(new_artist.seeking_venue)
        .bind(&new_artist.seeking_description)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(
        id: i64,
        update: &NewArtist,
        conn: &mut SqliteConnection,
    ) -> sqlx::Result<()> {
        let result = sqlx::query(
            "UPDATE artists SET
                 name = ?, city = ?, state = ?, phone = ?, image_link = ?,
                 facebook_link = ?, website = ?, genres = ?, seeking_venue = ?,
                 seeking_description = ?
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.city)
        .bind(&update.state)
        .bind(&update.phone)
        .bind(&update.image_link)
        .bind(&update.facebook_link)
        .bind(&update.website)
        .bind(Json(&update.genres))
        .bind(update.seeking_venue)
        .bind(&update.seeking_description)
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    /// Deletes the artist; the schema cascades the delete to their shows.
    pub async fn delete(id: i64, conn: &mut SqliteConnection) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}

/// A validated artist submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}
