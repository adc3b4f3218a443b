// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Coupon error: {0}")]
    Coupon(#[from] CouponError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Implement From for common error types
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Unknown(s)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog service error: {0}")]
    Service(String),

    #[error("Invalid catalog response: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum CouponError {
    /// Blank code after trimming. Caught locally, no service call is made.
    #[error("Please enter a coupon code")]
    EmptyCode,

    /// The coupon service rejected the code (invalid, expired, ineligible).
    #[error("{0}")]
    Rejected(String),

    /// The coupon service could not be reached or returned an unusable body.
    #[error("Coupon service error: {0}")]
    Service(String),

    /// A validation response arrived after its request was superseded
    /// (a newer request was issued or the coupon was removed) and was
    /// discarded without touching cart state.
    #[error("Coupon request superseded")]
    Superseded,
}

impl CouponError {
    /// Message shown next to the coupon input. Rejections surface the
    /// service's wording verbatim; transport-level detail collapses into
    /// a generic message.
    pub fn user_message(&self) -> String {
        match self {
            CouponError::EmptyCode => "Please enter a coupon code".to_string(),
            CouponError::Rejected(msg) => msg.clone(),
            CouponError::Service(_) | CouponError::Superseded => {
                "Failed to validate coupon".to_string()
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The order was created but no payment approval URL came back.
    /// Callers must treat this as a failure and keep the cart for retry.
    #[error("Failed to create payment order. Please try again.")]
    NoApprovalUrl,

    #[error("{0}")]
    Rejected(String),

    #[error("Checkout service error: {0}")]
    Service(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type CatalogResult<T> = Result<T, CatalogError>;
pub type CouponResult<T> = Result<T, CouponError>;
pub type CheckoutResult<T> = Result<T, CheckoutError>;
