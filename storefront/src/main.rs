//! CLI demo walking through the local storefront flows: filling a cart,
//! adjusting filters, and pricing a checkout. No server required.

use std::sync::Arc;

use foodcourt_runtime::Store;
use foodcourt_storefront::api::{MenuId, RestaurantId};
use foodcourt_storefront::app::{AppAction, AppReducer, AppState};
use foodcourt_storefront::cart::{CartAction, CartItemId, NewCartItem};
use foodcourt_storefront::checkout::{OrderConfirmation, PaymentMethod};
use foodcourt_storefront::config::StorefrontConfig;
use foodcourt_storefront::environment::StorefrontEnvironment;
use foodcourt_storefront::filters::FilterAction;

fn dish(
    id: i64,
    name: &str,
    unit_price: i64,
    restaurant_id: i64,
    restaurant_name: &str,
) -> NewCartItem {
    NewCartItem {
        id: CartItemId(id),
        menu_id: MenuId(id),
        name: name.to_string(),
        unit_price,
        image: None,
        restaurant_id: RestaurantId(restaurant_id),
        restaurant_name: restaurant_name.to_string(),
        restaurant_logo: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Foodcourt Storefront ===\n");

    let config = StorefrontConfig::from_env();
    let env = StorefrontEnvironment::production(&config);
    let state = AppState::restored(&*env.tokens);
    let fees = env.fees;
    let clock = Arc::clone(&env.clock);
    println!(
        "Session restored: {}",
        if state.session.is_authenticated {
            "signed in"
        } else {
            "signed out"
        }
    );

    let store = Store::new(state, AppReducer, env);

    println!("\nFilling the cart...");
    for candidate in [
        dish(1, "Sate Ayam", 25_000, 9, "Warung Padang"),
        dish(1, "Sate Ayam", 25_000, 9, "Warung Padang"),
        dish(2, "Es Teh Manis", 5_000, 9, "Warung Padang"),
        dish(20, "Bakso Urat", 18_000, 2, "Bakso Pak Min"),
    ] {
        store
            .send(AppAction::Cart(CartAction::AddItem { candidate }))
            .await?;
    }

    let cart = store.state(|state: &AppState| state.cart.clone()).await;
    println!(
        "Cart: {} lines, {} dishes, Rp{} before fees",
        cart.len(),
        cart.total_items(),
        cart.items_total()
    );
    for group in cart.restaurant_groups() {
        println!("  {} (Rp{}):", group.restaurant_name, group.subtotal());
        for item in &group.items {
            println!("    {}x {} @ Rp{}", item.quantity, item.name, item.unit_price);
        }
    }

    println!("\nNarrowing the restaurant list...");
    store
        .send(AppAction::Filters(FilterAction::ToggleRating { star: 4 }))
        .await?;
    store
        .send(AppAction::Filters(FilterAction::SetSearchQuery {
            query: "warung".to_string(),
        }))
        .await?;
    let filters = store.state(|state: &AppState| state.filters.clone()).await;
    println!(
        "Filters: ratings {:?}, query {:?}",
        filters.ratings, filters.search_query
    );

    // Price the selection the way a submission would, without calling the
    // order endpoint.
    let quote =
        OrderConfirmation::draft(cart.selection(None), fees, PaymentMethod::Bca, clock.now());
    println!("\nCheckout quote via {}:", quote.payment_method);
    println!("  Items    Rp{}", quote.items_total);
    println!("  Delivery Rp{}", quote.delivery_fee);
    println!("  Service  Rp{}", quote.service_fee);
    println!("  Total    Rp{}", quote.total);

    store.shutdown(std::time::Duration::from_secs(5)).await?;
    Ok(())
}
