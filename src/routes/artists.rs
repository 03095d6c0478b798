use axum::extract::{Extension, Form, Path};
use axum::response::{IntoResponse, Response};
use sqlx::SqlitePool;

use crate::db::DbConn;
use crate::error::{FyyurError, FyyurResult};
use crate::flash::{Flash, FlashMessage};
use crate::forms::artist::ArtistForm;
use crate::forms::FormFields;
use crate::models::artist::{Artist, NewArtist};
use crate::models::show::{Show, Timeline};
use crate::routes::{after_delete, after_write, Page, SearchForm};
use crate::templates::{ArtistFormPage, ArtistPage, ArtistsPage, SearchPage};
use crate::util::now;
use crate::validation::FormErrors;

pub async fn list(
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<ArtistsPage>> {
    let mut conn = pool.acquire().await?;
    let artists = Artist::all(&mut conn).await?;

    Ok(Page(ArtistsPage { flash, artists }))
}

pub async fn search(
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
    Form(SearchForm { search_term }): Form<SearchForm>,
) -> FyyurResult<Page<SearchPage>> {
    let mut conn = pool.acquire().await?;
    let results = Artist::search_results(&search_term, now(), &mut conn).await?;

    Ok(Page(SearchPage {
        flash,
        kind: "artists",
        search_term,
        results,
    }))
}

pub async fn detail(
    Path(id): Path<i64>,
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<ArtistPage>> {
    let mut conn = pool.acquire().await?;
    let artist = Artist::with_id(id, &mut conn).await?;
    let shows = Show::listings_for_artist(id, &mut conn).await?;

    Ok(Page(ArtistPage {
        flash,
        artist,
        shows: Timeline::partition(shows, now()),
    }))
}

pub async fn new_form(Flash(flash): Flash) -> Page<ArtistFormPage> {
    Page(ArtistFormPage {
        flash,
        title: "List a new artist".to_owned(),
        action: "/artists/create".to_owned(),
        form: ArtistForm::default(),
        errors: FormErrors::default(),
    })
}

pub async fn create(
    Extension(pool): Extension<SqlitePool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = ArtistForm::from_fields(&FormFields::new(fields));
    let new_artist = match form.validate() {
        Ok(new_artist) => new_artist,
        Err(errors) => {
            return Page(ArtistFormPage {
                flash: None,
                title: "List a new artist".to_owned(),
                action: "/artists/create".to_owned(),
                form,
                errors,
            })
            .into_response()
        }
    };

    let outcome = insert(&new_artist, &pool).await;
    after_write(
        outcome,
        format!("Artist {} was successfully listed!", new_artist.name),
        format!("An error occurred. Artist {} could not be listed.", new_artist.name),
        "/",
    )
}

pub async fn edit_form(
    Path(id): Path<i64>,
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<ArtistFormPage>> {
    let mut conn = pool.acquire().await?;
    let artist = Artist::with_id(id, &mut conn).await?;

    Ok(Page(edit_page(
        id,
        &artist.name,
        flash,
        ArtistForm::from_artist(&artist),
        FormErrors::default(),
    )))
}

pub async fn edit(
    Path(id): Path<i64>,
    Extension(pool): Extension<SqlitePool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> FyyurResult<Response> {
    let artist = {
        let mut conn = pool.acquire().await?;
        Artist::with_id(id, &mut conn).await?
    };

    let form = ArtistForm::from_fields(&FormFields::new(fields));
    let update = match form.validate() {
        Ok(update) => update,
        Err(errors) => {
            return Ok(Page(edit_page(id, &artist.name, None, form, errors)).into_response())
        }
    };

    let outcome = save(id, &update, &pool).await;
    Ok(after_write(
        outcome,
        format!("Artist {} was successfully edited!", update.name),
        format!("An error occurred. Artist {} could not be edited.", update.name),
        &format!("/artists/{}", id),
    ))
}

pub async fn delete(
    Path(id): Path<i64>,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Response> {
    if !Artist::exists(id, &mut *pool.acquire().await?).await? {
        return Err(FyyurError::NotFound);
    }

    let outcome = remove(id, &pool).await;
    Ok(after_delete(
        outcome,
        "Artist was successfully deleted!",
        "An error occurred. Artist could not be deleted.",
        "/",
    ))
}

/// The edit form, titled with the artist's stored name rather than whatever was typed.
fn edit_page(
    id: i64,
    name: &str,
    flash: Option<FlashMessage>,
    form: ArtistForm,
    errors: FormErrors,
) -> ArtistFormPage {
    ArtistFormPage {
        flash,
        title: format!("Edit artist {}", name),
        action: format!("/artists/{}/edit", id),
        form,
        errors,
    }
}

async fn insert(new_artist: &NewArtist, pool: &SqlitePool) -> sqlx::Result<i64> {
    let mut conn = DbConn::begin(pool).await?;
    let outcome = Artist::create(new_artist, &mut conn).await;

    conn.close(outcome).await
}

async fn save(id: i64, update: &NewArtist, pool: &SqlitePool) -> sqlx::Result<()> {
    let mut conn = DbConn::begin(pool).await?;
    let outcome = Artist::update(id, update, &mut conn).await;

    conn.close(outcome).await
}

async fn remove(id: i64, pool: &SqlitePool) -> sqlx::Result<()> {
    let mut conn = DbConn::begin(pool).await?;
    let outcome = Artist::delete(id, &mut conn).await;

    conn.close(outcome).await
}
