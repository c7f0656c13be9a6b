//! Checkout orchestration.
//!
//! Unlike the other reducers, checkout operates on the whole [`AppState`]:
//! it reads the cart and session, prices the selection, submits the order,
//! and on success clears the cart through the cart reducer.

use foodcourt_core::SmallVec;
use foodcourt_core::effect::Effect;
use foodcourt_core::reducer::Reducer;
use smallvec::smallvec;
use std::sync::Arc;

use super::types::{OrderConfirmation, PaymentMethod};
use crate::api::{CheckoutRequest, OrderLine, RestaurantId, RestaurantOrder, UserProfile};
use crate::app::AppState;
use crate::cart::{CartAction, CartLineItem, CartReducer};
use crate::environment::StorefrontEnvironment;

const CHECKOUT_FALLBACK: &str = "Failed to process order. Please try again.";
const EMPTY_SELECTION: &str = "No items to checkout";
const DEFAULT_ADDRESS: &str = "Default Address";
const DEFAULT_PHONE: &str = "0812-3456-7890";

/// Everything that can happen during checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutAction {
    /// Submit the current selection as an order.
    Submit {
        /// Restrict the order to one restaurant's lines; `None` submits
        /// the whole cart.
        scope: Option<RestaurantId>,
        /// Chosen payment method.
        payment_method: PaymentMethod,
    },
    /// The order was accepted.
    SubmitSucceeded {
        /// Snapshot of the placed order.
        confirmation: OrderConfirmation,
    },
    /// The order was rejected or the request failed.
    SubmitFailed {
        /// User-facing message.
        message: String,
        /// Whether the server rejected the session token.
        unauthorized: bool,
    },
}

/// Reducer over [`AppState`], orchestrating cart, session and the order
/// endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutReducer;

impl Reducer for CheckoutReducer {
    type State = AppState;
    type Action = CheckoutAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::Submit {
                scope,
                payment_method,
            } => {
                if state.checkout.is_processing {
                    tracing::warn!("Checkout already in flight, ignoring submit");
                    return SmallVec::new();
                }

                let selection = state.cart.selection(scope);
                if selection.is_empty() {
                    state.checkout.last_error = Some(EMPTY_SELECTION.to_string());
                    return SmallVec::new();
                }

                let confirmation = OrderConfirmation::draft(
                    selection.clone(),
                    env.fees,
                    payment_method,
                    env.clock.now(),
                );
                let request =
                    build_request(&selection, state.session.user.as_ref(), payment_method);

                state.checkout.is_processing = true;
                state.checkout.last_error = None;

                tracing::info!(
                    total = confirmation.total,
                    total_items = confirmation.total_items,
                    restaurants = request.restaurants.len(),
                    "Submitting order"
                );

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.checkout(&request).await {
                        Ok(order) => CheckoutAction::SubmitSucceeded {
                            confirmation: confirmation.with_order(&order),
                        },
                        Err(e) => CheckoutAction::SubmitFailed {
                            message: e.user_message(CHECKOUT_FALLBACK),
                            unauthorized: e.is_unauthorized(),
                        },
                    })
                }))]
            }
            CheckoutAction::SubmitSucceeded { confirmation } => {
                CartReducer.reduce(&mut state.cart, CartAction::Clear, &());
                state.checkout.is_processing = false;
                state.checkout.last_error = None;
                state.checkout.last_confirmation = Some(confirmation);
                SmallVec::new()
            }
            CheckoutAction::SubmitFailed { message, .. } => {
                state.checkout.is_processing = false;
                state.checkout.last_error = Some(message);
                SmallVec::new()
            }
        }
    }
}

/// Builds the order request: lines grouped by restaurant in first-seen
/// order, contact details from the profile with placeholder fallbacks.
fn build_request(
    selection: &[CartLineItem],
    user: Option<&UserProfile>,
    payment_method: PaymentMethod,
) -> CheckoutRequest {
    let delivery_address = user.map_or_else(
        || DEFAULT_ADDRESS.to_string(),
        |u| format!("{}, {}, {}", u.name, u.phone, u.email),
    );
    let phone = user
        .map(|u| u.phone.clone())
        .filter(|phone| !phone.is_empty())
        .unwrap_or_else(|| DEFAULT_PHONE.to_string());

    let mut restaurants: Vec<RestaurantOrder> = Vec::new();
    for item in selection {
        let line = OrderLine {
            menu_id: item.menu_id,
            quantity: item.quantity,
        };
        if let Some(group) = restaurants
            .iter_mut()
            .find(|group| group.restaurant_id == item.restaurant_id)
        {
            group.items.push(line);
        } else {
            restaurants.push(RestaurantOrder {
                restaurant_id: item.restaurant_id,
                items: vec![line],
            });
        }
    }

    CheckoutRequest {
        restaurants,
        delivery_address,
        phone,
        payment_method: payment_method.display_name().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use foodcourt_core::environment::Clock;
    use foodcourt_testing::assertions::{assert_has_future_effect, assert_no_effects};
    use foodcourt_testing::{ReducerTest, test_clock};

    use super::*;
    use crate::api::MenuId;
    use crate::cart::{CartItemId, NewCartItem};
    use crate::config::CheckoutFees;
    use crate::test_support::{profile, test_environment};

    fn line(id: i64, restaurant: i64, unit_price: i64) -> NewCartItem {
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

    fn app_with_cart(candidates: Vec<NewCartItem>) -> AppState {
        let mut state = AppState::default();
        for candidate in candidates {
            CartReducer.reduce(&mut state.cart, CartAction::AddItem { candidate }, &());
        }
        state
    }

    #[test]
    fn pricing_adds_both_fees_to_the_items_total() {
        let state = app_with_cart(vec![line(1, 9, 20_000)]);
        let confirmation = OrderConfirmation::draft(
            state.cart.selection(None),
            CheckoutFees::default(),
            PaymentMethod::Bni,
            test_clock().now(),
        );
        assert_eq!(confirmation.items_total, 20_000);
        assert_eq!(confirmation.total, 31_000);
        assert_eq!(confirmation.total_items, 1);
        assert_eq!(confirmation.placed_at, test_clock().now());
    }

    #[test]
    fn submit_marks_processing_and_spawns_the_call() {
        ReducerTest::new(CheckoutReducer)
            .with_env(test_environment())
            .given_state(app_with_cart(vec![line(1, 9, 20_000)]))
            .when_action(CheckoutAction::Submit {
                scope: None,
                payment_method: PaymentMethod::Bca,
            })
            .then_state(|state| {
                assert!(state.checkout.is_processing);
                assert!(state.checkout.last_error.is_none());
            })
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn empty_selection_fails_without_a_network_call() {
        ReducerTest::new(CheckoutReducer)
            .with_env(test_environment())
            .given_state(AppState::default())
            .when_action(CheckoutAction::Submit {
                scope: None,
                payment_method: PaymentMethod::Bni,
            })
            .then_state(|state| {
                assert!(!state.checkout.is_processing);
                assert_eq!(
                    state.checkout.last_error.as_deref(),
                    Some("No items to checkout")
                );
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn scoped_submit_with_no_matching_lines_also_fails_fast() {
        ReducerTest::new(CheckoutReducer)
            .with_env(test_environment())
            .given_state(app_with_cart(vec![line(1, 9, 20_000)]))
            .when_action(CheckoutAction::Submit {
                scope: Some(RestaurantId(42)),
                payment_method: PaymentMethod::Bni,
            })
            .then_state(|state| {
                assert_eq!(
                    state.checkout.last_error.as_deref(),
                    Some("No items to checkout")
                );
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn resubmit_while_processing_is_ignored() {
        let mut state = app_with_cart(vec![line(1, 9, 20_000)]);
        state.checkout.is_processing = true;
        ReducerTest::new(CheckoutReducer)
            .with_env(test_environment())
            .given_state(state)
            .when_action(CheckoutAction::Submit {
                scope: None,
                payment_method: PaymentMethod::Bni,
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn success_clears_the_cart_but_not_the_confirmation_snapshot() {
        let mut state = app_with_cart(vec![line(1, 9, 20_000), line(2, 9, 5_000)]);
        state.checkout.is_processing = true;
        let confirmation = OrderConfirmation::draft(
            state.cart.selection(None),
            CheckoutFees::default(),
            PaymentMethod::Mandiri,
            test_clock().now(),
        );

        CheckoutReducer.reduce(
            &mut state,
            CheckoutAction::SubmitSucceeded { confirmation },
            &test_environment(),
        );

        assert!(state.cart.is_empty());
        assert!(!state.checkout.is_processing);
        let snapshot = state.checkout.last_confirmation.as_ref().unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.items_total, 25_000);
    }

    #[test]
    fn failure_reports_the_message_and_leaves_the_cart_alone() {
        let mut state = app_with_cart(vec![line(1, 9, 20_000)]);
        state.checkout.is_processing = true;
        let before = state.cart.len();

        CheckoutReducer.reduce(
            &mut state,
            CheckoutAction::SubmitFailed {
                message: "Address required".to_string(),
                unauthorized: false,
            },
            &test_environment(),
        );

        assert_eq!(state.cart.len(), before);
        assert!(!state.checkout.is_processing);
        assert_eq!(
            state.checkout.last_error.as_deref(),
            Some("Address required")
        );
    }

    #[test]
    fn request_groups_lines_by_restaurant_in_first_seen_order() {
        let state = app_with_cart(vec![
            line(1, 9, 20_000),
            line(2, 7, 8_000),
            line(3, 9, 5_000),
        ]);
        let request = build_request(&state.cart.selection(None), None, PaymentMethod::Bri);

        assert_eq!(request.restaurants.len(), 2);
        assert_eq!(request.restaurants[0].restaurant_id, RestaurantId(9));
        assert_eq!(request.restaurants[0].items.len(), 2);
        assert_eq!(request.restaurants[1].restaurant_id, RestaurantId(7));
        assert_eq!(request.payment_method, "Bank Rakyat Indonesia");
    }

    #[test]
    fn contact_details_come_from_the_profile_with_fallbacks() {
        let state = app_with_cart(vec![line(1, 9, 20_000)]);
        let selection = state.cart.selection(None);

        let anonymous = build_request(&selection, None, PaymentMethod::Bni);
        assert_eq!(anonymous.delivery_address, "Default Address");
        assert_eq!(anonymous.phone, "0812-3456-7890");

        let user = profile("Budi");
        let signed_in = build_request(&selection, Some(&user), PaymentMethod::Bni);
        assert_eq!(
            signed_in.delivery_address,
            "Budi, 0812-1111-2222, budi@example.com"
        );
        assert_eq!(signed_in.phone, "0812-1111-2222");
    }
}
