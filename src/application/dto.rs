// src/application/dto.rs
// Wire shapes for the collaborator services. Field names follow the
// backend API (snake_case).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::models::{round_money, Coupon, OrderLine, PricedOrder};

/// Body of POST /coupons/validate.
#[derive(Debug, Serialize)]
pub struct CouponValidateRequest {
    pub code: String,
    pub order_total: Decimal,
}

/// Response of POST /coupons/validate. `discount_amount` is the
/// service's own computation and informational only; the cart recomputes
/// the discount from the coupon's type/value pair.
#[derive(Debug, Deserialize)]
pub struct CouponValidateResponse {
    pub valid: bool,
    #[serde(default)]
    pub coupon: Option<Coupon>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
}

/// Body of POST /shop/create-order.
#[derive(Debug, Serialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

impl From<&PricedOrder> for CreateOrderRequest {
    fn from(order: &PricedOrder) -> Self {
        Self {
            items: order.items.clone(),
            // The wire total is the displayed amount: two decimals.
            total: round_money(order.total),
            customer_email: order.customer_email.clone(),
            coupon_code: order.coupon_code.clone(),
        }
    }
}

/// Response of POST /shop/create-order. A missing `approval_url` means
/// the checkout failed even if the HTTP status was a success.
#[derive(Debug, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(default)]
    pub approval_url: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{OrderLine, ProductType};
    use rust_decimal_macros::dec;

    #[test]
    fn create_order_request_rounds_the_wire_total() {
        let order = PricedOrder {
            items: vec![OrderLine {
                product_id: "phys-1".into(),
                name: "Lion's Mane Extract".into(),
                quantity: 2,
                price: dec!(29.99),
                product_type: ProductType::Physical,
            }],
            subtotal: dec!(74.98),
            discount_amount: dec!(7.498),
            total: dec!(67.482),
            customer_email: "guest@apebrain.cloud".into(),
            coupon_code: Some("SAVE10".into()),
        };

        let request = CreateOrderRequest::from(&order);
        assert_eq!(request.total, dec!(67.48));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0]["product_id"], "phys-1");
        assert_eq!(json["items"][0]["product_type"], "physical");
        assert_eq!(json["coupon_code"], "SAVE10");
    }

    #[test]
    fn coupon_code_is_omitted_when_absent() {
        let order = PricedOrder {
            items: Vec::new(),
            subtotal: dec!(0),
            discount_amount: dec!(0),
            total: dec!(0),
            customer_email: "guest@apebrain.cloud".into(),
            coupon_code: None,
        };
        let json = serde_json::to_value(&CreateOrderRequest::from(&order)).unwrap();
        assert!(json.get("coupon_code").is_none());
    }

    #[test]
    fn validate_response_tolerates_missing_fields() {
        let body = r#"{"valid": false}"#;
        let response: CouponValidateResponse = serde_json::from_str(body).unwrap();
        assert!(!response.valid);
        assert!(response.coupon.is_none());
        assert!(response.message.is_none());
    }
}
