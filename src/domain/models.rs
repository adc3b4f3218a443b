// src/domain/models.rs
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of product being sold. Physical goods ship; digital goods are
/// delivered by download link after payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Physical,
    Digital,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Physical => "physical",
            ProductType::Digital => "digital",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ProductType {
    // Catalog entries without a type are treated as physical goods.
    fn default() -> Self {
        ProductType::Physical
    }
}

/// Catalog product. Supplied by the catalog service and read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// A product plus the quantity of it currently in the cart.
/// Quantity is always >= 1; a line decremented to zero is removed.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Price x quantity for this line, full precision.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

/// A server-validated discount code. The engine never invents these;
/// it only applies the type/value pair the coupon service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
}

/// One entry of the order payload handed to the checkout service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub product_type: ProductType,
}

/// A fully priced order, ready to hand to the checkout service.
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub items: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub customer_email: String,
    pub coupon_code: Option<String>,
}

/// Successful checkout handoff: where to send the customer to approve
/// payment, plus the order id the backend assigned.
#[derive(Debug, Clone)]
pub struct CheckoutHandoff {
    pub approval_url: String,
    pub order_id: Option<String>,
}

/// Current browsing session as supplied by the identity provider.
/// `email` is None for guests; the checkout builder substitutes the
/// configured guest placeholder.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub email: Option<String>,
}

impl Session {
    pub fn guest() -> Self {
        Self { email: None }
    }

    pub fn registered(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
        }
    }
}

/// Rounds a money amount for display or for the wire: exactly two
/// decimals, half rounded away from zero. Internal arithmetic stays at
/// full precision; only final displayed numbers go through this.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a money amount with exactly two decimal places.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let product = Product {
            id: "phys-1".into(),
            name: "Lion's Mane Extract".into(),
            price: dec!(29.99),
            product_type: ProductType::Physical,
            category: "Supplements".into(),
            description: String::new(),
        };
        let mut line = LineItem::new(product);
        line.quantity = 3;
        assert_eq!(line.line_total(), dec!(89.97));
    }

    #[test]
    fn money_formatting_uses_two_decimals() {
        assert_eq!(format_money(dec!(7.498)), "7.50");
        assert_eq!(format_money(dec!(0)), "0.00");
        assert_eq!(format_money(dec!(74.98)), "74.98");
    }

    #[test]
    fn product_type_deserializes_from_catalog_field() {
        let json = r#"{"id":"digi-1","name":"Guide","price":19.99,"type":"digital","category":"eBooks"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_type, ProductType::Digital);

        // Missing type defaults to physical, matching the backend.
        let json = r#"{"id":"x","name":"Mystery","price":1.00}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_type, ProductType::Physical);
    }
}
