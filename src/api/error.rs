//! HTTP error mapping

use crate::error::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Engine(#[from] Error),
}

/// Error payload returned by every failing route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(err) => match err {
                Error::QueueFull { .. } => StatusCode::CONFLICT,
                Error::QueueEmpty | Error::PartitionOutOfRange { .. } => StatusCode::NOT_FOUND,
                Error::LengthMismatch { .. }
                | Error::InvalidParams(_)
                | Error::InvalidConfig(_)
                | Error::Json(_) => StatusCode::BAD_REQUEST,
                Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
