//! Axum extractors that reject with [`FooBarsError`] so malformed requests get
//! the same JSON error body as every other failure.

use crate::error::FooBarsError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// The `{id}` segment of a resource route
pub struct KeyPath<K>(pub K);

impl<S, K> FromRequestParts<S> for KeyPath<K>
where
    S: Send + Sync,
    K: DeserializeOwned + Send,
{
    type Rejection = FooBarsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(key) = Path::<K>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| FooBarsError::BadRequest(rejection.body_text()))?;
        Ok(KeyPath(key))
    }
}

/// A JSON request body
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = FooBarsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| FooBarsError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}
