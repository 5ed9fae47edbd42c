//! Error surface for page handlers.
//!
//! Failures are deliberately coarse (backend call failed vs. bad input).
//! Loaders never surface these at all since they degrade to empty fallback
//! data; actions map everything onto one generic message for the user.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::backend::BackendError;
use crate::pages;

/// The one user-facing string every backend failure degrades to.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("{0}")]
    BadRequest(String),
}

impl WebError {
    /// HTTP status plus the message shown to the user.
    ///
    /// Backend failures all collapse onto [`GENERIC_ERROR`]; only input
    /// rejections carry their own text.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            WebError::Backend(BackendError::Status { status: 404, .. }) => (
                StatusCode::NOT_FOUND,
                "This page does not exist.".to_string(),
            ),
            WebError::Backend(e) => {
                error!(err = %e, "backend call failed");
                (StatusCode::BAD_GATEWAY, GENERIC_ERROR.to_string())
            }
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Html(pages::render_error(status.as_u16(), &message))).into_response()
    }
}
