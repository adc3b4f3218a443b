// src/domain/mod.rs
pub mod cart;
pub mod errors;
pub mod models;
pub mod repository;

// Re-export common types for convenience
pub use cart::Cart;
pub use errors::{
    AppError, AppResult, CatalogError, CatalogResult, CheckoutError, CheckoutResult, CouponError,
    CouponResult,
};
pub use models::{
    format_money, round_money, CheckoutHandoff, Coupon, DiscountType, LineItem, OrderLine,
    PricedOrder, Product, ProductType, Session,
};
