use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::{extractor::ExtractionFailure, fetcher::FetchError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing url parameter")]
    MissingUrl,

    #[error("Missing recipe text")]
    MissingText,

    #[error("Invalid url parameter")]
    InvalidUrl,

    #[error("Failed to fetch recipe page: {0}")]
    Fetch(FetchError),

    #[error("{0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::MissingUrl => ApiError::MissingUrl,
            FetchError::InvalidUrl => ApiError::InvalidUrl,
            other => ApiError::Fetch(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::MissingText => StatusCode::BAD_REQUEST,
            ApiError::InvalidUrl => StatusCode::BAD_REQUEST,
            ApiError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
