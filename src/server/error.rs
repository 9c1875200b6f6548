// src/server/error.rs
// =============================================================================
// Maps pipeline failures onto HTTP responses.
//
// Every error body has the same shape: {"message": "..."}
// - 400: the caller sent something we can't work with
// - 500: anything that went wrong while talking to GitHub
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::github::{LookupError, ParseError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing owner or repo parameter")]
    MissingRepository,

    #[error("Missing url parameter")]
    MissingUrl,

    #[error(transparent)]
    InvalidUrl(#[from] ParseError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingRepository | ApiError::MissingUrl | ApiError::InvalidUrl(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
