//! Shared fixtures for unit tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{
    ApiError, AuthPayload, CheckoutRequest, LoginRequest, Order, ProfileUpdate, RegisterRequest,
    Restaurant, RestaurantDetail, RestaurantId, ReviewRequest, ReviewResponse, StorefrontApi,
    UserProfile,
};
use crate::config::CheckoutFees;
use crate::environment::StorefrontEnvironment;
use crate::storage::MemoryTokenStore;

/// API stub for tests that only exercise the synchronous half of a
/// reducer. Effects built against it are inspected, never awaited.
pub struct UnreachableApi;

fn unreachable_call<T>() -> Result<T, ApiError> {
    Err(ApiError::RequestFailed("no API in this test".to_string()))
}

#[async_trait]
impl StorefrontApi for UnreachableApi {
    async fn register(&self, _request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        unreachable_call()
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        unreachable_call()
    }

    async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        unreachable_call()
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        unreachable_call()
    }

    async fn upload_avatar(
        &self,
        _bytes: Vec<u8>,
        _filename: String,
    ) -> Result<UserProfile, ApiError> {
        unreachable_call()
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        unreachable_call()
    }

    async fn restaurant_detail(&self, _id: RestaurantId) -> Result<RestaurantDetail, ApiError> {
        unreachable_call()
    }

    async fn checkout(&self, _request: &CheckoutRequest) -> Result<Order, ApiError> {
        unreachable_call()
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        unreachable_call()
    }

    async fn create_review(&self, _request: &ReviewRequest) -> Result<ReviewResponse, ApiError> {
        unreachable_call()
    }
}

/// Environment with a stub API, an in-memory token store, a fixed clock
/// and default fees.
pub fn test_environment() -> StorefrontEnvironment {
    StorefrontEnvironment::new(
        Arc::new(UnreachableApi),
        Arc::new(MemoryTokenStore::new()),
        Arc::new(foodcourt_testing::test_clock()),
        CheckoutFees::default(),
    )
}

/// A minimal profile fixture.
pub fn profile(name: &str) -> UserProfile {
    UserProfile {
        id: 1,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "0812-1111-2222".to_string(),
        avatar: None,
        created_at: None,
    }
}
