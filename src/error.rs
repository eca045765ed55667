use crate::common::{ErrorBody, ErrorCode};
use crate::repository::RepositoryError;
use crate::validation::ModelState;
use std::fmt::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FooBarsError>;

#[derive(Debug, Error)]
pub enum FooBarsError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Module registration failed: {message}")]
    ModuleRegistrationFailed { message: String },

    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("One or more validation errors occurred")]
    InvalidModel(ModelState),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FooBarsError {
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FooBarsError::NotFound { .. } => ErrorCode::NotFound,
            FooBarsError::InvalidModel(_) | FooBarsError::BadRequest(_) => ErrorCode::BadRequest,
            FooBarsError::DependencyNotFound { .. }
            | FooBarsError::DowncastFailed { .. }
            | FooBarsError::ModuleRegistrationFailed { .. }
            | FooBarsError::Repository(_)
            | FooBarsError::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

impl axum::response::IntoResponse for FooBarsError {
    fn into_response(self) -> axum::response::Response {
        let code = self.code();
        if code.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = ErrorBody::new(code, self.to_string());
        let body = match self {
            FooBarsError::InvalidModel(state) => body.with_errors(state.into_errors()),
            _ => body,
        };
        body.into_response()
    }
}
