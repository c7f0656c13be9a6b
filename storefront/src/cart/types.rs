//! Cart state and line items.

use serde::{Deserialize, Serialize};

use crate::api::{MenuId, RestaurantId};

/// Identifier of a cart line. In practice this is the menu identifier: two
/// additions of the same dish merge into one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(pub i64);

impl std::fmt::Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dish about to be added to the cart. Carries everything a line item
/// needs except the quantity, which starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Line identifier, usually the menu identifier.
    pub id: CartItemId,
    /// The menu item being ordered.
    pub menu_id: MenuId,
    /// Dish name, snapshotted at add time.
    pub name: String,
    /// Unit price in rupiah, snapshotted at add time.
    pub unit_price: i64,
    /// Photo URL.
    pub image: Option<String>,
    /// Restaurant the dish belongs to.
    pub restaurant_id: RestaurantId,
    /// Restaurant name, snapshotted at add time.
    pub restaurant_name: String,
    /// Restaurant logo URL.
    pub restaurant_logo: Option<String>,
}

impl NewCartItem {
    /// Turns the candidate into a line item with quantity 1.
    #[must_use]
    pub fn into_line_item(self) -> CartLineItem {
        CartLineItem {
            id: self.id,
            menu_id: self.menu_id,
            name: self.name,
            unit_price: self.unit_price,
            image: self.image,
            quantity: 1,
            restaurant_id: self.restaurant_id,
            restaurant_name: self.restaurant_name,
            restaurant_logo: self.restaurant_logo,
        }
    }
}

/// One line of the cart: a dish with a quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Line identifier.
    pub id: CartItemId,
    /// The menu item being ordered.
    pub menu_id: MenuId,
    /// Dish name.
    pub name: String,
    /// Unit price in rupiah.
    pub unit_price: i64,
    /// Photo URL.
    pub image: Option<String>,
    /// Quantity, always at least 1.
    pub quantity: u32,
    /// Restaurant the dish belongs to.
    pub restaurant_id: RestaurantId,
    /// Restaurant name.
    pub restaurant_name: String,
    /// Restaurant logo URL.
    pub restaurant_logo: Option<String>,
}

impl CartLineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub const fn line_total(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }
}

/// The cart's line items, grouped under one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantGroup {
    /// The restaurant.
    pub restaurant_id: RestaurantId,
    /// Restaurant name.
    pub restaurant_name: String,
    /// Restaurant logo URL.
    pub restaurant_logo: Option<String>,
    /// Lines for this restaurant, in insertion order.
    pub items: Vec<CartLineItem>,
}

impl RestaurantGroup {
    /// Sum of this group's line totals.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}

/// The cart: an ordered list of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// All line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Looks up a line by identifier.
    #[must_use]
    pub fn get(&self, id: CartItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<CartLineItem> {
        &mut self.items
    }

    /// Sum of all line totals, in rupiah.
    #[must_use]
    pub fn items_total(&self) -> i64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Total number of dishes across all lines (quantities summed).
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Lines grouped by restaurant, groups ordered by the first appearance
    /// of each restaurant in the cart.
    #[must_use]
    pub fn restaurant_groups(&self) -> Vec<RestaurantGroup> {
        let mut groups: Vec<RestaurantGroup> = Vec::new();
        for item in &self.items {
            if let Some(group) = groups
                .iter_mut()
                .find(|g| g.restaurant_id == item.restaurant_id)
            {
                group.items.push(item.clone());
            } else {
                groups.push(RestaurantGroup {
                    restaurant_id: item.restaurant_id,
                    restaurant_name: item.restaurant_name.clone(),
                    restaurant_logo: item.restaurant_logo.clone(),
                    items: vec![item.clone()],
                });
            }
        }
        groups
    }

    /// The lines a checkout would cover: the whole cart, or one
    /// restaurant's lines when a scope is given.
    #[must_use]
    pub fn selection(&self, scope: Option<RestaurantId>) -> Vec<CartLineItem> {
        match scope {
            Some(restaurant_id) => self
                .items
                .iter()
                .filter(|item| item.restaurant_id == restaurant_id)
                .cloned()
                .collect(),
            None => self.items.clone(),
        }
    }
}
