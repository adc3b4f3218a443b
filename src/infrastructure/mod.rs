// src/infrastructure/mod.rs
pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod http;

pub use catalog::HttpCatalog;
pub use checkout::HttpCheckout;
pub use coupon::HttpCouponValidator;
