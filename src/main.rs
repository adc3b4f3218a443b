// src/main.rs
use apebrain_shop::application::usecase::{filter_by_type, Storefront, StorefrontUseCase};
use apebrain_shop::config::Config;
use apebrain_shop::domain::errors::AppResult;
use apebrain_shop::domain::models::{format_money, ProductType, Session};
use apebrain_shop::domain::Cart;
use apebrain_shop::infrastructure::{HttpCatalog, HttpCheckout, HttpCouponValidator};

use std::env;
use std::sync::Arc;

/// Scripted storefront session against the live backend: fetch the
/// catalog, fill a cart, optionally apply a coupon (SHOP_DEMO_COUPON),
/// and hand the priced order to checkout.
#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting apebrain-shop v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using API base {}", config.services.base_url);

    let base_url = &config.services.base_url;
    let storefront = Storefront::new(
        Arc::new(HttpCatalog::new(base_url)),
        Arc::new(HttpCouponValidator::new(base_url)),
        Arc::new(HttpCheckout::new(base_url)),
        &config.store.guest_email(),
    );

    // Fetch the catalog
    let products = storefront.list_products().await?;
    log::info!("Catalog holds {} products", products.len());

    let physical = filter_by_type(&products, ProductType::Physical);
    let digital = filter_by_type(&products, ProductType::Digital);
    log::info!("{} physical, {} digital", physical.len(), digital.len());

    // Fill a cart: two units of the first physical product, one of the
    // first digital one.
    let mut cart = Cart::new();
    if let Some(product) = physical.first() {
        cart.add_item(product.clone());
        cart.add_item(product.clone());
    }
    if let Some(product) = digital.first() {
        cart.add_item(product.clone());
    }

    if cart.is_empty() {
        log::warn!("Catalog is empty, nothing to check out");
        return Ok(());
    }

    log::info!(
        "Cart: {} item(s), subtotal {}",
        cart.item_count(),
        format_money(cart.subtotal())
    );

    // Apply a coupon when one is configured; a rejection is not fatal,
    // the cart simply stays undiscounted.
    if let Ok(code) = env::var("SHOP_DEMO_COUPON") {
        match storefront.apply_coupon(&mut cart, &code).await {
            Ok(()) => log::info!(
                "Discount {}, total {}",
                format_money(cart.discount()),
                format_money(cart.total())
            ),
            Err(err) => log::warn!("Coupon not applied: {}", err.user_message()),
        }
    }

    // Hand off to the payment provider
    let handoff = storefront.checkout(&cart, &Session::guest()).await?;
    log::info!("Checkout ready, total {}", format_money(cart.total()));
    log::info!("Approval URL: {}", handoff.approval_url);
    if let Some(order_id) = handoff.order_id {
        log::info!("Order id: {}", order_id);
    }

    Ok(())
}
