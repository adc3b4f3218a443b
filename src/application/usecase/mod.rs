// src/application/usecase/mod.rs
pub mod storefront;

pub use storefront::{filter_by_category, filter_by_type, Storefront, StorefrontUseCase};
