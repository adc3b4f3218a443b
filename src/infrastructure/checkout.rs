// src/infrastructure/checkout.rs
use async_trait::async_trait;

use crate::application::dto::{CreateOrderRequest, CreateOrderResponse};
use crate::domain::errors::{CheckoutError, CheckoutResult};
use crate::domain::models::{CheckoutHandoff, PricedOrder};
use crate::domain::repository::CheckoutRepository;
use crate::infrastructure::http::HttpApi;

/// Checkout adapter against the shop backend's POST /shop/create-order.
/// The backend forwards the order to the payment provider and answers
/// with the approval URL the customer is redirected to.
pub struct HttpCheckout {
    api: HttpApi,
}

impl HttpCheckout {
    pub fn new(base_url: &str) -> Self {
        Self {
            api: HttpApi::new(base_url),
        }
    }
}

#[async_trait]
impl CheckoutRepository for HttpCheckout {
    async fn create_order(&self, order: &PricedOrder) -> CheckoutResult<CheckoutHandoff> {
        let request = CreateOrderRequest::from(order);

        let response = self
            .api
            .post("/shop/create-order", &request)
            .await
            .map_err(|e| CheckoutError::Service(e.to_string()))?;

        if response.status.is_client_error() {
            let detail = response
                .error_detail()
                .unwrap_or_else(|| "Checkout failed. Please try again.".to_string());
            log::warn!("Checkout rejected: {}", detail);
            return Err(CheckoutError::Rejected(detail));
        }
        if !response.is_success() {
            return Err(CheckoutError::Service(format!(
                "checkout service returned {}",
                response.status
            )));
        }

        let body: CreateOrderResponse = response
            .json()
            .map_err(|e| CheckoutError::Service(e.to_string()))?;

        // A 2xx without an approval URL is still a failure; the customer
        // has nowhere to approve the payment.
        match body.approval_url {
            Some(approval_url) => Ok(CheckoutHandoff {
                approval_url,
                order_id: body.order_id,
            }),
            None => Err(CheckoutError::NoApprovalUrl),
        }
    }
}
