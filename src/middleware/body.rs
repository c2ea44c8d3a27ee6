use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::models::patch::from_object;
use crate::error::ApiError;

/// JSON body extractor that only accepts an object and reports failures in the
/// error envelope
#[derive(Debug, Clone)]
pub struct JsonObject<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonObject<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await.map_err(rejection_to_api_error)?;
        let value = from_object(body).map_err(|e| ApiError::validation_error(e.to_string()))?;
        Ok(JsonObject(value))
    }
}

fn rejection_to_api_error(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE {
        ApiError::unsupported_media_type(rejection.body_text())
    } else {
        ApiError::validation_error(rejection.body_text())
    }
}
