//! Shared fixtures for the integration tests.

#![allow(dead_code)] // Not every test binary uses every fixture
#![allow(clippy::unwrap_used)] // Test code

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use foodcourt_storefront::api::{
    ApiError, AuthPayload, CheckoutRequest, LoginRequest, MenuId, Order, ProfileUpdate,
    RegisterRequest, Restaurant, RestaurantDetail, RestaurantId, ReviewRequest, ReviewResponse,
    StorefrontApi, UserProfile,
};
use foodcourt_storefront::cart::{CartItemId, NewCartItem};
use foodcourt_storefront::config::CheckoutFees;
use foodcourt_storefront::environment::StorefrontEnvironment;
use foodcourt_storefront::storage::MemoryTokenStore;

/// Scriptable API stub. Each call pops the next queued response; an empty
/// queue answers with a request failure.
#[derive(Default)]
pub struct MockApi {
    pub login_responses: Mutex<VecDeque<Result<AuthPayload, ApiError>>>,
    pub profile_responses: Mutex<VecDeque<Result<UserProfile, ApiError>>>,
    pub checkout_responses: Mutex<VecDeque<Result<Order, ApiError>>>,
    /// Requests seen by the checkout endpoint, in arrival order.
    pub checkout_requests: Mutex<Vec<CheckoutRequest>>,
    pub checkout_calls: AtomicUsize,
    /// Artificial latency before each checkout response.
    pub checkout_delay: Mutex<Duration>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_login(&self, response: Result<AuthPayload, ApiError>) {
        self.login_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_profile(&self, response: Result<UserProfile, ApiError>) {
        self.profile_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_checkout(&self, response: Result<Order, ApiError>) {
        self.checkout_responses.lock().unwrap().push_back(response);
    }

    pub fn set_checkout_delay(&self, delay: Duration) {
        *self.checkout_delay.lock().unwrap() = delay;
    }
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::RequestFailed("no scripted response".to_string()))
}

#[async_trait]
impl StorefrontApi for MockApi {
    async fn register(&self, _request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        unscripted()
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        self.login_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.profile_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.profile_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn upload_avatar(
        &self,
        _bytes: Vec<u8>,
        _filename: String,
    ) -> Result<UserProfile, ApiError> {
        self.profile_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        unscripted()
    }

    async fn restaurant_detail(&self, _id: RestaurantId) -> Result<RestaurantDetail, ApiError> {
        unscripted()
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError> {
        self.checkout_calls.fetch_add(1, Ordering::SeqCst);
        self.checkout_requests.lock().unwrap().push(request.clone());
        let delay = *self.checkout_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.checkout_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        unscripted()
    }

    async fn create_review(&self, _request: &ReviewRequest) -> Result<ReviewResponse, ApiError> {
        unscripted()
    }
}

/// Environment wired to a [`MockApi`], an in-memory token store and a
/// fixed clock.
pub fn mock_environment(api: Arc<MockApi>) -> (StorefrontEnvironment, Arc<MemoryTokenStore>) {
    let tokens = Arc::new(MemoryTokenStore::new());
    let env = StorefrontEnvironment::new(
        api,
        Arc::clone(&tokens) as _,
        Arc::new(foodcourt_testing::test_clock()),
        CheckoutFees::default(),
    );
    (env, tokens)
}

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

pub fn auth_payload(name: &str, token: &str) -> AuthPayload {
    AuthPayload {
        token: token.to_string(),
        user: profile(name),
    }
}

pub fn dish(id: i64, restaurant: i64, unit_price: i64) -> NewCartItem {
    NewCartItem {
        id: CartItemId(id),
        menu_id: MenuId(id),
        name: format!("Dish {id}"),
        unit_price,
        image: None,
        restaurant_id: RestaurantId(restaurant),
        restaurant_name: format!("Resto {restaurant}"),
        restaurant_logo: None,
    }
}

pub fn placed_order(transaction_id: &str) -> Order {
    Order {
        id: Some(501),
        transaction_id: Some(transaction_id.to_string()),
        status: Some("pending".to_string()),
        ..Order::default()
    }
}
