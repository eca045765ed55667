use axum::http::StatusCode as HttpStatusCode;
use strum_macros::{Display, EnumIter};

/// Failure categories surfaced in error bodies.
///
/// The `Display` form (the variant name) is what clients see in the `code`
/// field, so renaming a variant is a wire change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    InternalServerError,
}

impl ErrorCode {
    pub fn is_server_error(self) -> bool {
        HttpStatusCode::from(self).is_server_error()
    }
}

impl From<ErrorCode> for HttpStatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::BadRequest => HttpStatusCode::BAD_REQUEST,
            ErrorCode::NotFound => HttpStatusCode::NOT_FOUND,
            ErrorCode::InternalServerError => HttpStatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
