//! JSON body extractor with wire-contract rejections.
//!
//! axum's stock `Json` rejection renders its own error body; this wrapper
//! folds every body problem (bad syntax, wrong content type, mistyped
//! fields) into the API's own `{"error": "invalid_input"}` shape so clients
//! only ever parse one error format.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `Json<T>` that rejects with [`ApiError::InvalidInput`].
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "request body rejected");
                Err(ApiError::InvalidInput)
            }
        }
    }
}
