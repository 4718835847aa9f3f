//! Path parameter extractors
//!
//! Path rejections are rendered through `ApiError` instead of axum's
//! plain-text default.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::response::ApiError;

/// Longest device id accepted from a scanner client
pub const MAX_DEVICE_ID_LEN: usize = 64;

/// Extract path parameters, rejecting with `INVALID_PATH_PARAMETER`
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ApiPath(inner))
    }
}

/// Path parameters with a voucher or release id.
/// Kept as text: the resolver decides which kind of id it is.
#[derive(Debug, Deserialize)]
pub struct VoucherIdPath {
    pub id: String,
}

/// Path parameters with an event code
#[derive(Debug, Deserialize)]
pub struct EventCodePath {
    pub code: String,
}

/// Path parameters with a scanner device id
#[derive(Debug, Deserialize)]
pub struct DeviceIdPath {
    pub device_id: String,
}

impl DeviceIdPath {
    /// Device ids are short ASCII tokens chosen by the client
    pub fn device_id(&self) -> Result<&str, ApiError> {
        let id = self.device_id.as_str();
        let well_formed = !id.is_empty()
            && id.len() <= MAX_DEVICE_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        if well_formed {
            Ok(id)
        } else {
            Err(ApiError::invalid_path("Invalid device_id format"))
        }
    }
}
