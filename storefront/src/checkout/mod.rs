//! Checkout: pricing, the order request builder, the confirmation
//! snapshot, and the orchestrating reducer.

mod reducer;
mod types;

pub use reducer::{CheckoutAction, CheckoutReducer};
pub use types::{CheckoutState, OrderConfirmation, PaymentMethod, RestaurantInfo};
