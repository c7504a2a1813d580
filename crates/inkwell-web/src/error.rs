//! Handler error type.

use crate::pages;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use inkwell_store::StoreError;
use tracing::error;

/// Failure that ends a request with an error page
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("post not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WebError {
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound(title.into())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            Self::NotFound(title) => pages::not_found_page(&format!("Could not find post '{title}'.")),
            Self::Store(e) => {
                error!("Storage failure: {}", e);
                pages::error_page()
            }
        };
        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WebError::not_found("x").status(), StatusCode::NOT_FOUND);
        let io = std::io::Error::other("disk gone");
        assert_eq!(
            WebError::from(StoreError::from(io)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response() {
        let resp = WebError::not_found("Intro").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
