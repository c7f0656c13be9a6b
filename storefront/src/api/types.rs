//! Wire types for the remote storefront API.
//!
//! The backend speaks camelCase JSON and wraps most payloads in a
//! `{ success, message, data }` envelope. Fields the backend sometimes
//! omits are modelled as `Option` or defaulted so older payload shapes
//! still decode.

use serde::{Deserialize, Serialize};

/// Identifier of a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub i64);

impl std::fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub i64);

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier.
    #[serde(default)]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, may be empty for legacy accounts.
    #[serde(default)]
    pub phone: String,
    /// Avatar URL, when one has been uploaded.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Account creation timestamp, RFC 3339.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Token and profile returned by login and registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: UserProfile,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Account password.
    pub password: String,
}

/// Partial update for `PUT /auth/profile`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Inclusive price range of a restaurant's menu, in rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Cheapest menu price.
    pub min: i64,
    /// Most expensive menu price.
    pub max: i64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 0, max: 0 }
    }
}

/// A restaurant as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Restaurant identifier.
    pub id: RestaurantId,
    /// Restaurant name.
    pub name: String,
    /// Average rating, 0.0 to 5.0.
    #[serde(default)]
    pub star: f64,
    /// Human-readable location.
    #[serde(default)]
    pub place: String,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Cuisine category.
    #[serde(default)]
    pub category: String,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Number of menu items.
    #[serde(default)]
    pub menu_count: u32,
    /// Menu price range.
    #[serde(default)]
    pub price_range: PriceRange,
    /// Distance from the client in kilometres, when known.
    #[serde(default)]
    pub distance: Option<f64>,
}

/// `data` payload of the restaurant listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPage {
    /// The restaurants on this page.
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
}

/// A menu entry in a restaurant detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Menu identifier.
    pub id: MenuId,
    /// Dish name.
    pub food_name: String,
    /// Unit price in rupiah.
    pub price: i64,
    /// Dish type, e.g. "food" or "drink".
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    /// Photo URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Author of a review, as embedded in detail payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUser {
    /// User identifier.
    #[serde(default)]
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A review in a restaurant detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review identifier.
    pub id: i64,
    /// Star rating, 1 to 5.
    #[serde(default)]
    pub star: u8,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
    /// Creation timestamp, RFC 3339.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Review author.
    #[serde(default)]
    pub user: Option<ReviewUser>,
}

/// A restaurant with its menus and reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    /// Restaurant identifier.
    pub id: RestaurantId,
    /// Restaurant name.
    pub name: String,
    /// Average rating, 0.0 to 5.0.
    #[serde(default)]
    pub star: f64,
    /// Human-readable location.
    #[serde(default)]
    pub place: String,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Cuisine category.
    #[serde(default)]
    pub category: String,
    /// The restaurant's menu.
    #[serde(default)]
    pub menus: Vec<MenuItem>,
    /// Recent reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// One line of an order to submit, scoped to a single menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Menu item to order.
    pub menu_id: MenuId,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

/// Order lines grouped under the restaurant they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantOrder {
    /// Restaurant the lines belong to.
    pub restaurant_id: RestaurantId,
    /// Lines for this restaurant.
    pub items: Vec<OrderLine>,
}

/// Body for `POST /order/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Order lines, grouped by restaurant.
    pub restaurants: Vec<RestaurantOrder>,
    /// Delivery address.
    pub delivery_address: String,
    /// Contact phone number.
    pub phone: String,
    /// Chosen payment method, as the bank's display name.
    pub payment_method: String,
}

/// Server-computed pricing attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPricing {
    /// Sum of item prices.
    #[serde(default)]
    pub subtotal: i64,
    /// Service fee.
    #[serde(default)]
    pub service_fee: i64,
    /// Delivery fee.
    #[serde(default)]
    pub delivery_fee: i64,
    /// Grand total.
    #[serde(default)]
    pub total_price: i64,
}

/// A line within a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Order line identifier.
    #[serde(default)]
    pub id: i64,
    /// Ordered menu item.
    #[serde(default)]
    pub menu_id: Option<MenuId>,
    /// Dish name at order time.
    #[serde(default)]
    pub menu_name: String,
    /// Unit price at order time.
    #[serde(default)]
    pub price: i64,
    /// Quantity ordered.
    #[serde(default)]
    pub quantity: u32,
    /// Photo URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Restaurant summary embedded in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRestaurant {
    /// Restaurant identifier.
    pub id: RestaurantId,
    /// Restaurant name.
    #[serde(default)]
    pub name: String,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
}

/// A placed order's lines for one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRestaurantGroup {
    /// The restaurant.
    pub restaurant: OrderRestaurant,
    /// Lines for this restaurant.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Sum of this restaurant's line prices.
    #[serde(default)]
    pub subtotal: i64,
}

/// A placed order. The backend has shipped several shapes of this payload,
/// so most fields tolerate absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// Public transaction identifier.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Order status, e.g. "pending" or "delivered".
    #[serde(default)]
    pub status: Option<String>,
    /// Delivery address.
    #[serde(default)]
    pub delivery_address: Option<String>,
    /// Payment method used.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Server-computed pricing.
    #[serde(default)]
    pub pricing: Option<OrderPricing>,
    /// Order lines grouped by restaurant.
    #[serde(default)]
    pub restaurants: Vec<OrderRestaurantGroup>,
    /// Creation timestamp, RFC 3339.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `POST /review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Transaction the review refers to.
    pub transaction_id: String,
    /// Restaurant being reviewed.
    pub restaurant_id: RestaurantId,
    /// Star rating, 1 to 5.
    pub star: u8,
    /// Free-form comment.
    pub comment: String,
    /// Menu items covered by the review.
    pub menu_ids: Vec<MenuId>,
}

/// Response of `POST /review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    /// Review identifier.
    pub id: i64,
    /// Star rating.
    #[serde(default)]
    pub star: u8,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
    /// Creation timestamp, RFC 3339.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Transaction the review refers to.
    #[serde(default)]
    pub transaction_id: Option<String>,
}
