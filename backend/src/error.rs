use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ApiResponse;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no reference waypoints available")]
    NoReferenceWaypoints,
}

#[derive(Debug, Error)]
pub enum CampusDataError {
    #[error("failed to read campus data: {0}")]
    Io(#[from] io::Error),
    #[error("invalid campus data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate location id {0}")]
    DuplicateLocation(String),
    #[error("duplicate path node id {0}")]
    DuplicatePathNode(String),
    #[error("path node {node} connects to unknown node {target}")]
    UnknownConnection { node: String, target: String },
}

/// Failures surfaced at the HTTP boundary as `{ success: false, error }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Location not found")]
    LocationNotFound,
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("No reference waypoints available")]
    Route(#[from] RouteError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCoordinates | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::LocationNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Route(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self:?}");
        } else {
            tracing::debug!("rejecting request with {status}: {self}");
        }
        (status, Json(ApiResponse::<()>::failure(self.to_string()))).into_response()
    }
}
