//! Error handling for the app.
//!
//! Form problems never reach this type: they are reported inline on the
//! re-rendered form. Storage failures during a write are turned into a
//! failure flash by the route that attempted them. Everything else ends up
//! here and is rendered as an error page.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::templates::{NotFoundPage, ServerErrorPage};

/// The error enum for all request handling.
#[derive(Debug, Error)]
pub enum FyyurError {
    /// \[404\] The page or record requested does not exist.
    #[error("resource not found")]
    NotFound,
    /// \[500\] The database could not be read.
    #[error("database error: {0}")]
    DbError(#[from] sqlx::Error),
    /// \[500\] A page failed to render.
    #[error("template error: {0}")]
    TemplateError(#[from] askama::Error),
}

/// The return type for all handlers.
pub type FyyurResult<T> = Result<T, FyyurError>;

impl FyyurError {
    pub fn status(&self) -> StatusCode {
        match self {
            FyyurError::NotFound => StatusCode::NOT_FOUND,
            FyyurError::DbError(_) | FyyurError::TemplateError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for FyyurError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            FyyurError::NotFound => NotFoundPage::default().render(),
            other => {
                tracing::error!(error = %other, "request failed");
                ServerErrorPage::default().render()
            }
        };

        match page {
            Ok(body) => (status, Html(body)).into_response(),
            Err(error) => {
                tracing::error!(%error, "failed to render error page");
                (status, self.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_failure() {
        assert_eq!(FyyurError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            FyyurError::DbError(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_renders_the_404_page() {
        let response = FyyurError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
