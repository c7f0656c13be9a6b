//! Restaurant list filter criteria.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::api::Restaurant;

/// Distance choices offered by the list view, in kilometres. `0` means
/// "nearby"; no selection means all distances.
pub const DISTANCE_CHOICES: [u8; 4] = [0, 1, 3, 5];

/// Price bounds applied to a restaurant's menu range, in rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Lower bound.
    pub min: i64,
    /// Upper bound.
    pub max: i64,
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            min: 0,
            max: 1_000_000,
        }
    }
}

/// Filter criteria for the restaurant list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected cuisine category, empty for all.
    pub category: String,
    /// Price bounds a restaurant's range must overlap.
    pub price_range: PriceBounds,
    /// Case-insensitive name query.
    pub search_query: String,
    /// Selected star ratings; a restaurant matches when the floor of its
    /// rating is in the set. Empty means all ratings.
    pub ratings: BTreeSet<u8>,
    /// Maximum distance in kilometres, `None` for all distances.
    pub distance: Option<u8>,
}

impl FilterState {
    /// Whether a restaurant passes the current criteria.
    ///
    /// Price ranges must overlap, the rating floor must be selected (or no
    /// rating selected), the name must contain the query, and the
    /// restaurant must be within the selected distance when one is set.
    #[must_use]
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let price_ok = restaurant.price_range.min <= self.price_range.max
            && restaurant.price_range.max >= self.price_range.min;

        let star_floor = restaurant.star.floor();
        let rating_ok = self.ratings.is_empty()
            || self.ratings.iter().any(|r| f64::from(*r) == star_floor);

        let search_ok = restaurant
            .name
            .to_lowercase()
            .contains(&self.search_query.to_lowercase());

        let distance_ok = match self.distance {
            None => true,
            Some(limit) => restaurant
                .distance
                .is_some_and(|d| d <= f64::from(limit)),
        };

        price_ok && rating_ok && search_ok && distance_ok
    }
}
