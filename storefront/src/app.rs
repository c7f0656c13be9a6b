//! Application-level composition: one state, one action enum, one reducer.

use foodcourt_core::SmallVec;
use foodcourt_core::effect::Effect;
use foodcourt_core::reducer::Reducer;
use foodcourt_runtime::Store;

use crate::cart::{CartAction, CartReducer, CartState};
use crate::checkout::{CheckoutAction, CheckoutReducer, CheckoutState};
use crate::environment::StorefrontEnvironment;
use crate::filters::{FilterAction, FilterState, FiltersReducer};
use crate::session::{SessionAction, SessionReducer, SessionState};
use crate::storage::TokenStore;

/// The whole application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// The shopping cart.
    pub cart: CartState,
    /// Restaurant list filters.
    pub filters: FilterState,
    /// The authentication session.
    pub session: SessionState,
    /// Checkout progress.
    pub checkout: CheckoutState,
}

impl AppState {
    /// Fresh state with a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state with the session seeded from persisted storage.
    #[must_use]
    pub fn restored(tokens: &dyn TokenStore) -> Self {
        Self {
            session: SessionState::restore(tokens),
            ..Self::default()
        }
    }
}

/// Union of every domain's actions.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Cart operations.
    Cart(CartAction),
    /// Filter operations.
    Filters(FilterAction),
    /// Session operations and events.
    Session(SessionAction),
    /// Checkout operations and events.
    Checkout(CheckoutAction),
}

/// Routes each action to its domain reducer and lifts the resulting
/// effects back into [`AppAction`].
///
/// Checkout failures carrying a 401 additionally invalidate the session,
/// mirroring how an expired token signs the whole application out no
/// matter which call tripped over it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Cart(action) => CartReducer
                .reduce(&mut state.cart, action, &())
                .into_iter()
                .map(|effect| effect.map_action(AppAction::Cart))
                .collect(),
            AppAction::Filters(action) => FiltersReducer
                .reduce(&mut state.filters, action, &())
                .into_iter()
                .map(|effect| effect.map_action(AppAction::Filters))
                .collect(),
            AppAction::Session(action) => SessionReducer
                .reduce(&mut state.session, action, env)
                .into_iter()
                .map(|effect| effect.map_action(AppAction::Session))
                .collect(),
            AppAction::Checkout(action) => {
                let unauthorized = matches!(
                    &action,
                    CheckoutAction::SubmitFailed {
                        unauthorized: true,
                        ..
                    }
                );
                let mut effects: SmallVec<[Effect<AppAction>; 4]> = CheckoutReducer
                    .reduce(state, action, env)
                    .into_iter()
                    .map(|effect| effect.map_action(AppAction::Checkout))
                    .collect();
                if unauthorized {
                    tracing::warn!("Order rejected with 401, invalidating session");
                    effects.extend(
                        SessionReducer
                            .reduce(&mut state.session, SessionAction::Unauthorized, env)
                            .into_iter()
                            .map(|effect| effect.map_action(AppAction::Session)),
                    );
                }
                effects
            }
        }
    }
}

/// The application's store type.
pub type AppStore = Store<AppState, AppAction, StorefrontEnvironment, AppReducer>;
