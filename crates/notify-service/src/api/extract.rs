//! Request extractors that report malformed input as `ServiceError`.

use crate::error::ServiceError;
use axum::{
    async_trait,
    extract::{FromRequest, Query, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Parameters read from the query string when one is present, otherwise
/// from a JSON body.
///
/// OTP callers post `?phoneNumber=...&otp=...` with no body; newer callers
/// send JSON.
#[derive(Debug)]
pub struct Params<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ServiceError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if request.uri().query().is_some_and(|q| !q.is_empty()) {
            let Query(value) = Query::<T>::try_from_uri(request.uri())
                .map_err(|e| ServiceError::InvalidRequest(e.body_text()))?;
            return Ok(Self(value));
        }

        let JsonBody(value) = JsonBody::<T>::from_request(request, state).await?;
        Ok(Self(value))
    }
}

/// JSON body whose rejections become 400 `INVALID_REQUEST`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ServiceError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|e| ServiceError::InvalidRequest(e.body_text()))?;
        Ok(Self(value))
    }
}
