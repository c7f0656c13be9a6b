//! Remote API surface.
//!
//! Reducers depend on the [`StorefrontApi`] trait rather than the concrete
//! [`ApiClient`], so tests can substitute canned responses without a server.

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AuthPayload, CheckoutRequest, LoginRequest, MenuId, MenuItem, Order, OrderItem, OrderLine,
    OrderPricing, OrderRestaurant, OrderRestaurantGroup, PriceRange, ProfileUpdate,
    RegisterRequest, Restaurant, RestaurantDetail, RestaurantId, RestaurantOrder, RestaurantPage,
    Review, ReviewRequest, ReviewResponse, ReviewUser, UserProfile,
};

/// The remote operations the storefront depends on.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or registration is rejected.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError>;

    /// Exchanges credentials for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or credentials are rejected.
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError>;

    /// Fetches the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the token is stale.
    async fn get_profile(&self) -> Result<UserProfile, ApiError>;

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or validation rejects a field.
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError>;

    /// Uploads a new avatar image.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the image is rejected.
    async fn upload_avatar(&self, bytes: Vec<u8>, filename: String)
    -> Result<UserProfile, ApiError>;

    /// Lists all restaurants.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiError>;

    /// Fetches one restaurant with its menus and reviews.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the restaurant is unknown.
    async fn restaurant_detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError>;

    /// Submits an order.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the order is rejected.
    async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError>;

    /// Fetches the authenticated user's order history.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the token is stale.
    async fn my_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Submits a review for a delivered order.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the review is rejected.
    async fn create_review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ApiError>;
}

#[async_trait]
impl StorefrontApi for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        Self::register(self, request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        Self::login(self, request).await
    }

    async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        Self::get_profile(self).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        Self::update_profile(self, update).await
    }

    async fn upload_avatar(
        &self,
        bytes: Vec<u8>,
        filename: String,
    ) -> Result<UserProfile, ApiError> {
        Self::upload_avatar(self, bytes, filename).await
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        Self::list_restaurants(self).await
    }

    async fn restaurant_detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError> {
        Self::restaurant_detail(self, id).await
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError> {
        Self::checkout(self, request).await
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        Self::my_orders(self).await
    }

    async fn create_review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ApiError> {
        Self::create_review(self, request).await
    }
}
