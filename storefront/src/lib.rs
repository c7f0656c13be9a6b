//! Client-side state machine for a food-ordering storefront.
//!
//! Four domains, each with its own reducer:
//!
//! - [`cart`]: line items, quantity merging, totals and grouping; pure.
//! - [`filters`]: restaurant list criteria and the matching predicate; pure.
//! - [`session`]: login, registration and profile calls; token persisted
//!   through [`storage::TokenStore`].
//! - [`checkout`]: prices the cart, submits the order, clears the cart on
//!   success and snapshots the confirmation.
//!
//! [`app`] composes them into one [`app::AppReducer`] suitable for a
//! [`foodcourt_runtime::Store`]; [`api`] holds the HTTP client behind the
//! [`api::StorefrontApi`] trait.
//!
//! # Example
//!
//! ```ignore
//! use foodcourt_runtime::Store;
//! use foodcourt_storefront::app::{AppAction, AppState, AppReducer};
//! use foodcourt_storefront::cart::CartAction;
//! use foodcourt_storefront::config::StorefrontConfig;
//! use foodcourt_storefront::environment::StorefrontEnvironment;
//!
//! let config = StorefrontConfig::from_env();
//! let env = StorefrontEnvironment::production(&config);
//! let state = AppState::restored(&*env.tokens);
//! let store = Store::new(state, AppReducer, env);
//! ```

pub mod api;
pub mod app;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod environment;
pub mod filters;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{AppAction, AppReducer, AppState, AppStore};
pub use environment::StorefrontEnvironment;
