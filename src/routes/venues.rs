use axum::extract::{Extension, Form, Path};
use axum::response::{IntoResponse, Response};
use sqlx::SqlitePool;

use crate::db::DbConn;
use crate::error::{FyyurError, FyyurResult};
use crate::flash::{Flash, FlashMessage};
use crate::forms::venue::VenueForm;
use crate::forms::FormFields;
use crate::models::area::group_by_area;
use crate::models::show::{Show, Timeline};
use crate::models::upcoming_counts;
use crate::models::venue::{NewVenue, Venue};
use crate::routes::{after_delete, after_write, Page, SearchForm};
use crate::templates::{SearchPage, VenueFormPage, VenuePage, VenuesPage};
use crate::util::now;
use crate::validation::FormErrors;

pub async fn list(
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<VenuesPage>> {
    let mut conn = pool.acquire().await?;
    let venues = Venue::all_by_area(&mut conn).await?;
    let shows = Show::all(&mut conn).await?;
    let counts = upcoming_counts(&shows, now(), |show| show.venue_id);

    Ok(Page(VenuesPage {
        flash,
        areas: group_by_area(venues, &counts),
    }))
}

pub async fn search(
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
    Form(SearchForm { search_term }): Form<SearchForm>,
) -> FyyurResult<Page<SearchPage>> {
    let mut conn = pool.acquire().await?;
    let results = Venue::search_results(&search_term, now(), &mut conn).await?;

    Ok(Page(SearchPage {
        flash,
        kind: "venues",
        search_term,
        results,
    }))
}

pub async fn detail(
    Path(id): Path<i64>,
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<VenuePage>> {
    let mut conn = pool.acquire().await?;
    let venue = Venue::with_id(id, &mut conn).await?;
    let shows = Show::listings_for_venue(id, &mut conn).await?;

    Ok(Page(VenuePage {
        flash,
        venue,
        shows: Timeline::partition(shows, now()),
    }))
}

pub async fn new_form(Flash(flash): Flash) -> Page<VenueFormPage> {
    Page(create_page(flash, VenueForm::default(), FormErrors::default()))
}

pub async fn create(
    Extension(pool): Extension<SqlitePool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = VenueForm::from_fields(&FormFields::new(fields));
    let new_venue = match form.validate() {
        Ok(new_venue) => new_venue,
        Err(errors) => return Page(create_page(None, form, errors)).into_response(),
    };

    let outcome = insert(&new_venue, &pool).await;
    after_write(
        outcome,
        format!("Venue {} was successfully listed!", new_venue.name),
        format!("An error occurred. Venue {} could not be listed.", new_venue.name),
        "/",
    )
}

pub async fn edit_form(
    Path(id): Path<i64>,
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<VenueFormPage>> {
    let mut conn = pool.acquire().await?;
    let venue = Venue::with_id(id, &mut conn).await?;

    let form = VenueForm::from_venue(&venue);

    Ok(Page(edit_page(&venue, flash, form, FormErrors::default())))
}

pub async fn edit(
    Path(id): Path<i64>,
    Extension(pool): Extension<SqlitePool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> FyyurResult<Response> {
    let venue = {
        let mut conn = pool.acquire().await?;
        Venue::with_id(id, &mut conn).await?
    };

    let form = VenueForm::from_fields(&FormFields::new(fields));
    let update = match form.validate() {
        Ok(update) => update,
        Err(errors) => {
            return Ok(Page(edit_page(&venue, None, form, errors)).into_response());
        }
    };

    let outcome = save(id, &update, &pool).await;
    Ok(after_write(
        outcome,
        format!("Venue {} was successfully edited!", update.name),
        format!("An error occurred. Venue {} could not be edited.", update.name),
        &format!("/venues/{}", id),
    ))
}

pub async fn delete(
    Path(id): Path<i64>,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Response> {
    if !Venue::exists(id, &mut *pool.acquire().await?).await? {
        return Err(FyyurError::NotFound);
    }

    let outcome = remove(id, &pool).await;
    Ok(after_delete(
        outcome,
        "Venue was successfully deleted!",
        "An error occurred. Venue could not be deleted.",
        "/",
    ))
}

fn create_page(flash: Option<FlashMessage>, form: VenueForm, errors: FormErrors) -> VenueFormPage {
    VenueFormPage {
        flash,
        title: "List a new venue".to_owned(),
        action: "/venues/create".to_owned(),
        form,
        errors,
    }
}

fn edit_page(
    venue: &Venue,
    flash: Option<FlashMessage>,
    form: VenueForm,
    errors: FormErrors,
) -> VenueFormPage {
    VenueFormPage {
        flash,
        title: format!("Edit venue {}", venue.name),
        action: format!("/venues/{}/edit", venue.id),
        form,
        errors,
    }
}

async fn insert(new_venue: &NewVenue, pool: &SqlitePool) -> sqlx::Result<i64> {
    let mut conn = DbConn::begin(pool).await?;
    let outcome = Venue::create(new_venue, &mut conn).await;

    conn.close(outcome).await
}

async fn save(id: i64, update: &NewVenue, pool: &SqlitePool) -> sqlx::Result<()> {
    let mut conn = DbConn::begin(pool).await?;
    let outcome = Venue::update(id, update, &mut conn).await;

    conn.close(outcome).await
}

async fn remove(id: i64, pool: &SqlitePool) -> sqlx::Result<()> {
    let mut conn = DbConn::begin(pool).await?;
    let outcome = Venue::delete(id, &mut conn).await;

    conn.close(outcome).await
}
