use crate::common::ErrorCode;
use axum::{
    Json,
    http::{StatusCode as HttpStatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON body sent with every failed request
///
/// # Example
/// ```
/// use foobars::common::{ErrorBody, ErrorCode};
///
/// let body = ErrorBody::new(ErrorCode::NotFound, "FooBar 7 not found");
/// assert_eq!(body.status_code, 404);
/// assert_eq!(body.code, "NotFound");
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,

    pub code: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: HttpStatusCode::from(code).as_u16(),
            code: code.to_string(),
            message: message.into(),
            errors: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach per-field validation messages
    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status = HttpStatusCode::from_u16(self.status_code)
            .unwrap_or(HttpStatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Outcome of a save: a new resource (201 with `Location`) or an updated one (200).
#[derive(Debug)]
pub enum Saved<T: Serialize> {
    Created { location: String, resource: T },
    Updated(T),
}

impl<T: Serialize> IntoResponse for Saved<T> {
    fn into_response(self) -> Response {
        match self {
            Saved::Created { location, resource } => (
                HttpStatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(resource),
            )
                .into_response(),
            Saved::Updated(resource) => (HttpStatusCode::OK, Json(resource)).into_response(),
        }
    }
}
