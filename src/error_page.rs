//! Full page responses for requests that cannot be served.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full HTML page explaining why a request failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorPage {
    /// The route or resource does not exist.
    NotFound,
    /// Something failed on the server, e.g., the database.
    Internal {
        description: &'static str,
        fix: &'static str,
    },
}

impl ErrorPage {
    /// The generic internal error page, used when the cause should not be shown to the client.
    pub const INTERNAL: ErrorPage = ErrorPage::Internal {
        description: "Sorry, something went wrong.",
        fix: "Try again later or check the server logs",
    };
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let (status_code, markup) = match self {
            ErrorPage::NotFound => (
                StatusCode::NOT_FOUND,
                error_view(
                    "Not Found",
                    "404",
                    "Something's missing.",
                    "Sorry, we can't find that page. Your expenses are on the home page.",
                ),
            ),
            ErrorPage::Internal { description, fix } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view("Internal Server Error", "500", description, fix),
            ),
        };

        (status_code, Html(markup.into_string())).into_response()
    }
}

/// Fallback handler for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    ErrorPage::NotFound.into_response()
}
