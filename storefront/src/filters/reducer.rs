//! Pure filter reducer.

use foodcourt_core::SmallVec;
use foodcourt_core::effect::Effect;
use foodcourt_core::reducer::Reducer;

use super::types::{FilterState, PriceBounds};

/// Everything that can happen to the list filters. All operations are
/// synchronous and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Overwrite the category.
    SetCategory {
        /// New category, empty for all.
        category: String,
    },
    /// Overwrite the price bounds. Not clamped: an inverted range simply
    /// matches fewer restaurants.
    SetPriceRange {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
    /// Toggle a star rating in or out of the selected set.
    ToggleRating {
        /// The rating, 1 to 5.
        star: u8,
    },
    /// Overwrite the search query.
    SetSearchQuery {
        /// New query text.
        query: String,
    },
    /// Select a distance limit. Selecting the current value again clears
    /// the selection.
    SetDistance {
        /// New limit in kilometres, `None` to clear.
        distance: Option<u8>,
    },
    /// Restore the initial criteria.
    ResetFilters,
}

/// Reducer over [`FilterState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FiltersReducer;

impl Reducer for FiltersReducer {
    type State = FilterState;
    type Action = FilterAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FilterAction::SetCategory { category } => {
                state.category = category;
            }
            FilterAction::SetPriceRange { min, max } => {
                state.price_range = PriceBounds { min, max };
            }
            FilterAction::ToggleRating { star } => {
                if !state.ratings.remove(&star) {
                    state.ratings.insert(star);
                }
            }
            FilterAction::SetSearchQuery { query } => {
                state.search_query = query;
            }
            FilterAction::SetDistance { distance } => {
                state.distance = if state.distance == distance {
                    None
                } else {
                    distance
                };
            }
            FilterAction::ResetFilters => {
                *state = FilterState::default();
            }
        }
        SmallVec::new()
    }
}
