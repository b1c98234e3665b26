//! Common extractors for API handlers.
//!
//! Wrap axum's `Json`, `Path` and `Query` so rejections come back as
//! structured [`ApiError`] bodies instead of plain text.

use axum::extract::{rejection::QueryRejection, FromRequest, FromRequestParts};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ApiError, ErrorCode};

/// JSON body extractor with structured rejections
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path extractor with structured rejections
///
/// A non-numeric id (`/api/tutorials/abc`) becomes a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query extractor with structured rejections
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::with_details(
            ErrorCode::InvalidFormat,
            "Invalid query string",
            err.body_text(),
        )
    }
}

/// Filter parameters for listing tutorials
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitleFilter {
    /// Case-sensitive title fragment
    pub title: Option<String>,
}

impl TitleFilter {
    /// The fragment, trimmed; blank counts as no filter
    pub fn fragment(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
