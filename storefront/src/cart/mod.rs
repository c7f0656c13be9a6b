//! The shopping cart: line items, derived totals and grouping, and the
//! pure reducer that mutates them.

mod reducer;
mod types;

pub use reducer::{CartAction, CartReducer};
pub use types::{CartItemId, CartLineItem, CartState, NewCartItem, RestaurantGroup};
