// src/domain/repository/mod.rs
// Ports to the external collaborators. Implementations live under
// infrastructure/; tests substitute in-memory fakes.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::errors::{CatalogResult, CheckoutResult, CouponResult};
use crate::domain::models::{CheckoutHandoff, Coupon, PricedOrder, Product};

/// Read-only product catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;
}

/// Coupon validator. Eligibility rules (active flag, expiry, minimum
/// order value) are entirely the service's business, which is why the
/// current subtotal travels with the code. A successful result is the
/// validated coupon; rejections come back as `CouponError::Rejected`
/// carrying the service's message.
#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn validate(&self, code: &str, order_total: Decimal) -> CouponResult<Coupon>;
}

/// Order intake of the payment provider integration. A successful call
/// yields the approval URL the customer is redirected to; an order
/// without one is a failure, never a silent success.
#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    async fn create_order(&self, order: &PricedOrder) -> CheckoutResult<CheckoutHandoff>;
}
