//! Checkout state, payment methods and the order confirmation snapshot.

use foodcourt_core::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Order, RestaurantId};
use crate::cart::CartLineItem;
use crate::config::CheckoutFees;

/// Banks accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Bank Negara Indonesia.
    Bni,
    /// Bank Rakyat Indonesia.
    Bri,
    /// Bank Central Asia.
    Bca,
    /// Mandiri.
    Mandiri,
}

impl PaymentMethod {
    /// All accepted banks, in display order.
    pub const ALL: [Self; 4] = [Self::Bni, Self::Bri, Self::Bca, Self::Mandiri];

    /// The bank's full display name, also what the order endpoint expects.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bni => "Bank Negara Indonesia",
            Self::Bri => "Bank Rakyat Indonesia",
            Self::Bca => "Bank Central Asia",
            Self::Mandiri => "Mandiri",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Restaurant summary shown on the confirmation view, taken from the
/// first line of the checked-out selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantInfo {
    /// Restaurant identifier.
    pub id: RestaurantId,
    /// Restaurant name.
    pub name: String,
    /// Logo URL.
    pub logo: Option<String>,
}

/// Snapshot of a successfully placed order, carried to the confirmation
/// view. Owns copies of the checked-out lines, so clearing the live cart
/// afterwards does not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Payment method chosen.
    pub payment_method: PaymentMethod,
    /// Sum of line totals, before fees.
    pub items_total: i64,
    /// Delivery fee applied.
    pub delivery_fee: i64,
    /// Service fee applied.
    pub service_fee: i64,
    /// Grand total: items plus both fees.
    pub total: i64,
    /// Number of dishes across all lines.
    pub total_items: u32,
    /// Server-side order identifier, when the response carried one.
    pub order_id: Option<i64>,
    /// Server-side transaction identifier, when the response carried one.
    pub transaction_id: Option<String>,
    /// The checked-out lines, copied at submission time.
    pub items: Vec<CartLineItem>,
    /// The first line's restaurant, for the confirmation header.
    pub restaurant_info: Option<RestaurantInfo>,
    /// When the order was submitted, client clock.
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Prices a selection under the given fees and snapshots it. Server
    /// identifiers are filled in by [`Self::with_order`] once the response
    /// arrives.
    #[must_use]
    pub fn draft(
        items: Vec<CartLineItem>,
        fees: CheckoutFees,
        payment_method: PaymentMethod,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let items_total: i64 = items.iter().map(CartLineItem::line_total).sum();
        let total_items: u32 = items.iter().map(|item| item.quantity).sum();
        let restaurant_info = items.first().map(|item| RestaurantInfo {
            id: item.restaurant_id,
            name: item.restaurant_name.clone(),
            logo: item.restaurant_logo.clone(),
        });
        Self {
            payment_method,
            items_total,
            delivery_fee: fees.delivery_fee,
            service_fee: fees.service_fee,
            total: items_total + fees.delivery_fee + fees.service_fee,
            total_items,
            order_id: None,
            transaction_id: None,
            items,
            restaurant_info,
            placed_at,
        }
    }

    /// Copies server identifiers from the checkout response.
    #[must_use]
    pub fn with_order(mut self, order: &Order) -> Self {
        self.order_id = order.id;
        self.transaction_id = order.transaction_id.clone();
        self
    }
}

/// Checkout progress and its outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// Whether a submission is in flight. Further submissions are ignored
    /// while set.
    pub is_processing: bool,
    /// Message of the last failed submission.
    pub last_error: Option<String>,
    /// The last successful order.
    pub last_confirmation: Option<OrderConfirmation>,
}

impl CheckoutState {
    /// Creates an idle checkout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_processing: false,
            last_error: None,
            last_confirmation: None,
        }
    }
}
