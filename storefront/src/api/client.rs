//! HTTP client for the remote storefront API.
//!
//! Every authenticated request re-reads the token from the [`TokenStore`],
//! so a login or logout mid-flight is picked up by the next request
//! without rebuilding the client.

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::types::{
    AuthPayload, CheckoutRequest, LoginRequest, Order, ProfileUpdate, RegisterRequest, Restaurant,
    RestaurantDetail, RestaurantId, RestaurantPage, ReviewRequest, ReviewResponse, UserProfile,
};
use crate::storage::TokenStore;

/// Standard response envelope: `{ success, message, data }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Error body: `{ success, message, errors }`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Vec<String>>,
}

/// Client for the remote storefront backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for the given base URL, attaching the stored token
    /// to every authenticated request.
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attaches the bearer token when one is stored. A missing or unreadable
    /// token sends the request unauthenticated; the server answers 401 and
    /// the caller invalidates the session from there.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token, sending unauthenticated");
                request
            }
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))
    }

    /// Decodes a response, unwrapping the `data` envelope when present and
    /// falling back to the bare body otherwise.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default();
            return Err(ApiError::Unauthorized { message });
        }
        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: parsed.message.unwrap_or_default(),
                errors: parsed.errors.unwrap_or_default(),
            });
        }

        if let Ok(Envelope { data: Some(data) }) = serde_json::from_str::<Envelope<T>>(&body) {
            return Ok(data);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the server rejects the
    /// registration.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        let response = self
            .execute(self.http.post(self.url("/auth/register")).json(request))
            .await?;
        Self::decode(response).await
    }

    /// Exchanges credentials for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or credentials are rejected.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let response = self
            .execute(self.http.post(self.url("/auth/login")).json(request))
            .await?;
        Self::decode(response).await
    }

    /// Fetches the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the token is missing or stale.
    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        let response = self
            .execute(self.authorized(self.http.get(self.url("/auth/profile"))))
            .await?;
        Self::decode(response).await
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or validation rejects a field.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let response = self
            .execute(self.authorized(self.http.put(self.url("/auth/profile")).json(update)))
            .await?;
        Self::decode(response).await
    }

    /// Uploads a new avatar image via multipart form data.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the image is rejected.
    pub async fn upload_avatar(
        &self,
        bytes: Vec<u8>,
        filename: String,
    ) -> Result<UserProfile, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("avatar", part);
        let response = self
            .execute(self.authorized(self.http.put(self.url("/auth/profile")).multipart(form)))
            .await?;
        Self::decode(response).await
    }

    /// Lists all restaurants.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the payload cannot be
    /// decoded.
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        let response = self
            .execute(self.authorized(self.http.get(self.url("/resto"))))
            .await?;
        let page: RestaurantPage = Self::decode(response).await?;
        Ok(page.restaurants)
    }

    /// Fetches one restaurant with its menus and reviews.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the restaurant is unknown.
    pub async fn restaurant_detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError> {
        let response = self
            .execute(self.authorized(self.http.get(self.url(&format!("/resto/{id}")))))
            .await?;
        Self::decode(response).await
    }

    /// Submits an order.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the server rejects the
    /// order.
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError> {
        let response = self
            .execute(self.authorized(self.http.post(self.url("/order/checkout")).json(request)))
            .await?;
        Self::decode(response).await
    }

    /// Fetches the authenticated user's order history.
    ///
    /// The backend has shipped several nestings of this payload over time;
    /// the known shapes are probed in priority order and an unrecognised
    /// body yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the token is stale.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        let response = self
            .execute(self.authorized(self.http.get(self.url("/order/my-order"))))
            .await?;
        let body: Value = Self::decode_raw(response).await?;
        Ok(extract_orders(&body))
    }

    /// Submits a review for a delivered order.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the review is rejected.
    pub async fn create_review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ApiError> {
        let response = self
            .execute(self.authorized(self.http.post(self.url("/review")).json(request)))
            .await?;
        Self::decode(response).await
    }

    /// Like [`Self::decode`] but without envelope unwrapping, for payloads
    /// whose shape is probed manually.
    async fn decode_raw(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default();
            return Err(ApiError::Unauthorized { message });
        }
        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: parsed.message.unwrap_or_default(),
                errors: parsed.errors.unwrap_or_default(),
            });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }
}

/// Probes the known order-history shapes in priority order.
fn extract_orders(body: &Value) -> Vec<Order> {
    const POINTERS: [&str; 4] = ["/data/transactions", "/data/orders", "/orders", "/data"];
    for pointer in POINTERS {
        if let Some(array) = body.pointer(pointer).and_then(Value::as_array) {
            return decode_order_array(array);
        }
    }
    if let Some(array) = body.as_array() {
        return decode_order_array(array);
    }
    Vec::new()
}

/// Decodes each element independently, skipping ones that fail so one
/// malformed order does not hide the rest of the history.
fn decode_order_array(array: &[Value]) -> Vec<Order> {
    array
        .iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(order) => Some(order),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable order entry");
                None
            }
        })
        .collect()
}
