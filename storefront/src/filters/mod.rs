//! Restaurant list filters: criteria, the matching predicate, and the
//! pure reducer that edits them.

mod reducer;
mod types;

pub use reducer::{FilterAction, FiltersReducer};
pub use types::{DISTANCE_CHOICES, FilterState, PriceBounds};
