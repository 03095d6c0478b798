use axum::extract::{Extension, Form, Path};
use axum::response::{IntoResponse, Response};
use sqlx::SqlitePool;

use crate::db::DbConn;
use crate::error::{FyyurError, FyyurResult};
use crate::flash::{Flash, FlashMessage};
use crate::forms::show::ShowForm;
use crate::forms::FormFields;
use crate::models::show::{Show, Timeline};
use crate::routes::{after_delete, after_write, Page, SearchForm};
use crate::templates::{SearchShowsPage, ShowFormPage, ShowsPage};
use crate::util::now;
use crate::validation::FormErrors;

pub async fn list(
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<ShowsPage>> {
    let mut conn = pool.acquire().await?;
    let shows = Show::listings(&mut conn).await?;

    Ok(Page(ShowsPage {
        flash,
        shows: Timeline::partition(shows, now()),
    }))
}

pub async fn search(
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
    Form(SearchForm { search_term }): Form<SearchForm>,
) -> FyyurResult<Page<SearchShowsPage>> {
    let mut conn = pool.acquire().await?;
    let shows = Show::search(&search_term, &mut conn).await?;

    Ok(Page(SearchShowsPage {
        flash,
        search_term,
        shows,
    }))
}

pub async fn new_form(Flash(flash): Flash) -> Page<ShowFormPage> {
    Page(form_page(None, flash, ShowForm::default(), FormErrors::default()))
}

pub async fn create(
    Extension(pool): Extension<SqlitePool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = ShowForm::from_fields(&FormFields::new(fields));

    let outcome = match insert(&form, &pool).await {
        Ok(Err(errors)) => return Page(form_page(None, None, form, errors)).into_response(),
        Ok(Ok(id)) => Ok(id),
        Err(error) => Err(error),
    };
    after_write(
        outcome,
        "Show was successfully listed!",
        "An error occurred. Show could not be listed.",
        "/",
    )
}

pub async fn edit_form(
    Path(id): Path<i64>,
    Flash(flash): Flash,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Page<ShowFormPage>> {
    let mut conn = pool.acquire().await?;
    let show = Show::with_id_opt(id, &mut conn)
        .await?
        .ok_or(FyyurError::NotFound)?;

    Ok(Page(form_page(
        Some(id),
        flash,
        ShowForm::from_show(&show),
        FormErrors::default(),
    )))
}

pub async fn edit(
    Path(id): Path<i64>,
    Extension(pool): Extension<SqlitePool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> FyyurResult<Response> {
    if Show::with_id_opt(id, &mut *pool.acquire().await?)
        .await?
        .is_none()
    {
        return Err(FyyurError::NotFound);
    }

    let form = ShowForm::from_fields(&FormFields::new(fields));
    let outcome = match save(id, &form, &pool).await {
        Ok(Err(errors)) => {
            return Ok(Page(form_page(Some(id), None, form, errors)).into_response());
        }
        Ok(Ok(())) => Ok(()),
        Err(error) => Err(error),
    };
    Ok(after_write(
        outcome,
        "Show was successfully edited!",
        "An error occurred. Show could not be edited.",
        "/shows",
    ))
}

pub async fn delete(
    Path(id): Path<i64>,
    Extension(pool): Extension<SqlitePool>,
) -> FyyurResult<Response> {
    if Show::with_id_opt(id, &mut *pool.acquire().await?)
        .await?
        .is_none()
    {
        return Err(FyyurError::NotFound);
    }

    let outcome = remove(id, &pool).await;
    Ok(after_delete(
        outcome,
        "Show was successfully deleted!",
        "An error occurred. Show could not be deleted.",
        "/",
    ))
}

/// The new show form, or the edit form if there is an `id`.
fn form_page(
    id: Option<i64>,
    flash: Option<FlashMessage>,
    form: ShowForm,
    errors: FormErrors,
) -> ShowFormPage {
    let (title, action) = match id {
        Some(id) => (format!("Edit show {}", id), format!("/shows/{}/edit", id)),
        None => ("List a new show".to_owned(), "/shows/create".to_owned()),
    };

    ShowFormPage {
        flash,
        title,
        action,
        form,
        errors,
    }
}

/// Checks the artist and venue inside the same transaction that writes the show,
/// so a rejected form leaves nothing behind.
async fn insert(form: &ShowForm, pool: &SqlitePool) -> sqlx::Result<Result<i64, FormErrors>> {
    let mut conn = DbConn::begin(pool).await?;
    let new_show = match form.validate(&mut conn).await? {
        Ok(new_show) => new_show,
        Err(errors) => return Ok(Err(errors)),
    };

    let outcome = Show::create(&new_show, &mut conn).await;
    conn.close(outcome).await.map(Ok)
}

async fn save(id: i64, form: &ShowForm, pool: &SqlitePool) -> sqlx::Result<Result<(), FormErrors>> {
    let mut conn = DbConn::begin(pool).await?;
    let update = match form.validate(&mut conn).await? {
        Ok(update) => update,
        Err(errors) => return Ok(Err(errors)),
    };

    let outcome = Show::update(id, &update, &mut conn).await;
    conn.close(outcome).await.map(Ok)
}

async fn remove(id: i64, pool: &SqlitePool) -> sqlx::Result<()> {
    let mut conn = DbConn::begin(pool).await?;
    let outcome = Show::delete(id, &mut conn).await;

    conn.close(outcome).await
}
