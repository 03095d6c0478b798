//! The site's routes.
//!
//! Reads render a page straight from a pooled connection. Writes validate
//! first, then run in a single [`DbConn`](crate::db::DbConn) transaction and
//! answer with a redirect carrying a flash message.

pub mod artists;
pub mod shows;
pub mod venues;

use askama::Template;
use axum::extract::Extension;
use axum::handler::Handler;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::error::FyyurError;
use crate::flash::{Flash, FlashMessage, CLEAR_COOKIE};
use crate::templates::HomePage;

pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/venues", get(venues::list))
        .route("/venues/create", get(venues::new_form).post(venues::create))
        .route("/venues/search", post(venues::search))
        .route("/venues/:id", get(venues::detail).delete(venues::delete))
        .route("/venues/:id/edit", get(venues::edit_form).post(venues::edit))
        .route("/artists", get(artists::list))
        .route("/artists/create", get(artists::new_form).post(artists::create))
        .route("/artists/search", post(artists::search))
        .route("/artists/:id", get(artists::detail).delete(artists::delete))
        .route("/artists/:id/edit", get(artists::edit_form).post(artists::edit))
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::new_form).post(shows::create))
        .route("/shows/search", post(shows::search))
        .route("/shows/:id", axum::routing::delete(shows::delete))
        .route("/shows/:id/edit", get(shows::edit_form).post(shows::edit))
        .fallback(not_found.into_service())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(pool))
}

async fn home(Flash(flash): Flash) -> Page<HomePage> {
    Page(HomePage { flash })
}

async fn not_found() -> FyyurError {
    FyyurError::NotFound
}

/// A page to render. Rendering it uses up any pending flash message.
pub struct Page<T>(pub T);

impl<T: Template> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => ([(SET_COOKIE, CLEAR_COOKIE)], Html(body)).into_response(),
            Err(error) => FyyurError::from(error).into_response(),
        }
    }
}

/// The body of the search boxes.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// The flash saying whether a write went through.
///
/// The cause of a failure is logged, and the user only sees `failure`.
pub fn write_outcome<T>(
    outcome: sqlx::Result<T>,
    success: impl Into<String>,
    failure: impl Into<String>,
) -> FlashMessage {
    match outcome {
        Ok(_) => FlashMessage::success(success),
        Err(error) => {
            let failure = failure.into();
            tracing::error!(%error, "{}", failure);
            FlashMessage::error(failure)
        }
    }
}

/// Redirects a submitted form to `to`, with the outcome of its write flashed there.
pub fn after_write<T>(
    outcome: sqlx::Result<T>,
    success: impl Into<String>,
    failure: impl Into<String>,
    to: &str,
) -> Response {
    write_outcome(outcome, success, failure).redirect(to)
}

/// Tells the delete script where to go, with the outcome flashed there.
pub fn after_delete(
    outcome: sqlx::Result<()>,
    success: impl Into<String>,
    failure: impl Into<String>,
    to: &str,
) -> Response {
    write_outcome(outcome, success, failure).navigate(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(response: &Response) -> &str {
        response.headers()["location"].to_str().unwrap()
    }

    #[test]
    fn successful_writes_flash_success() {
        let response = after_write(Ok(()), "Show was successfully listed!", "nope", "/");

        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[test]
    fn failed_writes_still_redirect() {
        let outcome: sqlx::Result<()> = Err(sqlx::Error::PoolClosed);
        let response = after_write(
            outcome,
            "yes",
            "An error occurred. Show could not be listed.",
            "/shows",
        );

        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/shows");
    }

    #[test]
    fn deletes_answer_with_the_next_page() {
        let response = after_delete(Ok(()), "Show was successfully deleted!", "nope", "/");

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert!(response.headers().get("location").is_none());
    }

    #[test]
    fn failed_writes_flash_the_failure() {
        let outcome: sqlx::Result<()> = Err(sqlx::Error::PoolClosed);
        let failure = "An error occurred. Show could not be deleted.";

        assert_eq!(
            write_outcome(outcome, "yes", failure),
            FlashMessage::error(failure)
        );
    }

    #[test]
    fn pages_clear_the_flash_cookie() {
        let response = Page(HomePage::default()).into_response();

        assert_eq!(response.headers()[SET_COOKIE], CLEAR_COOKIE);
    }
}
