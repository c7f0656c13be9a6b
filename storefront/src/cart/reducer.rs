//! Pure cart reducer.

use foodcourt_core::SmallVec;
use foodcourt_core::effect::Effect;
use foodcourt_core::reducer::Reducer;

use super::types::{CartItemId, CartState, NewCartItem};

/// Everything that can happen to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add a dish. Merges into the existing line when the dish is already
    /// in the cart.
    AddItem {
        /// The dish to add.
        candidate: NewCartItem,
    },
    /// Increase a line's quantity by 1.
    IncrementQuantity {
        /// The line to bump.
        id: CartItemId,
    },
    /// Decrease a line's quantity by 1, removing the line at quantity 1.
    DecrementQuantity {
        /// The line to lower.
        id: CartItemId,
    },
    /// Remove a line outright, regardless of quantity.
    RemoveItem {
        /// The line to remove.
        id: CartItemId,
    },
    /// Empty the cart.
    Clear,
}

/// Reducer over [`CartState`]. Entirely synchronous; the cart never talks
/// to the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddItem { candidate } => {
                let items = state.items_mut();
                if let Some(existing) = items.iter_mut().find(|item| item.id == candidate.id) {
                    existing.quantity += 1;
                } else {
                    items.push(candidate.into_line_item());
                }
            }
            CartAction::IncrementQuantity { id } => {
                if let Some(item) = state.items_mut().iter_mut().find(|item| item.id == id) {
                    item.quantity += 1;
                }
            }
            CartAction::DecrementQuantity { id } => {
                let items = state.items_mut();
                if let Some(index) = items.iter().position(|item| item.id == id) {
                    if items[index].quantity > 1 {
                        items[index].quantity -= 1;
                    } else {
                        items.remove(index);
                    }
                }
            }
            CartAction::RemoveItem { id } => {
                state.items_mut().retain(|item| item.id != id);
            }
            CartAction::Clear => {
                state.items_mut().clear();
            }
        }
        SmallVec::new()
    }
}
