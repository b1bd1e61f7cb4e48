//! Request extractors whose rejections are reported as [`ApiError`]s
//!
//! axum's own extractors reject with plain-text bodies; these wrappers keep
//! every client error in the `{"error": ...}` JSON shape.

use axum::{
    Form, Json, async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;

pub const MALFORMED_BODY: &str = "Malformed request body";
pub const MALFORMED_QUERY: &str = "Malformed query string";

/// Body decoded from `application/json` or `application/x-www-form-urlencoded`
///
/// A request with neither content type and an empty body decodes to
/// `T::default()`, so missing fields are reported by field validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|e| {
                warn!("Rejected JSON body: {}", e);
                ApiError::validation(MALFORMED_BODY)
            })?;
            return Ok(Self(payload));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = Form::<T>::from_request(req, state).await.map_err(|e| {
                warn!("Rejected form body: {}", e);
                ApiError::validation(MALFORMED_BODY)
            })?;
            return Ok(Self(payload));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::validation(MALFORMED_BODY))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            Ok(Self(T::default()))
        } else {
            warn!("Rejected body with content type {:?}", content_type);
            Err(ApiError::validation(MALFORMED_BODY))
        }
    }
}

/// Query string decoded into `T`
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!("Rejected query string: {}", e);
                ApiError::validation(MALFORMED_QUERY)
            })?;
        Ok(Self(query))
    }
}

/// The `:id` path segment of a user route
///
/// A segment that cannot even be decoded names no user, so it is reported
/// as not found like any other unknown id.
#[derive(Debug, Clone)]
pub struct UserIdParam(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!("Rejected user path: {}", e);
                ApiError::user_not_found()
            })?;
        Ok(Self(id))
    }
}
