// src/infrastructure/coupon.rs
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::application::dto::{CouponValidateRequest, CouponValidateResponse};
use crate::domain::errors::{CouponError, CouponResult};
use crate::domain::models::Coupon;
use crate::domain::repository::CouponRepository;
use crate::infrastructure::http::HttpApi;

/// Coupon adapter against the shop backend's POST /coupons/validate.
///
/// 4xx responses carry the service's rejection wording (unknown code,
/// expired, below minimum spend) and map to `Rejected`; everything else
/// that goes wrong maps to `Service` and is shown to the customer as a
/// generic validation failure.
pub struct HttpCouponValidator {
    api: HttpApi,
}

impl HttpCouponValidator {
    pub fn new(base_url: &str) -> Self {
        Self {
            api: HttpApi::new(base_url),
        }
    }
}

#[async_trait]
impl CouponRepository for HttpCouponValidator {
    async fn validate(&self, code: &str, order_total: Decimal) -> CouponResult<Coupon> {
        let request = CouponValidateRequest {
            code: code.to_string(),
            order_total,
        };

        let response = self
            .api
            .post("/coupons/validate", &request)
            .await
            .map_err(|e| CouponError::Service(e.to_string()))?;

        if response.status.is_client_error() {
            let detail = response
                .error_detail()
                .unwrap_or_else(|| "Invalid coupon code".to_string());
            return Err(CouponError::Rejected(detail));
        }
        if !response.is_success() {
            return Err(CouponError::Service(format!(
                "coupon service returned {}",
                response.status
            )));
        }

        let body: CouponValidateResponse = response
            .json()
            .map_err(|e| CouponError::Service(e.to_string()))?;

        if body.valid {
            body.coupon
                .ok_or_else(|| CouponError::Service("valid response without coupon".to_string()))
        } else {
            Err(CouponError::Rejected(
                body.message
                    .unwrap_or_else(|| "Invalid coupon code".to_string()),
            ))
        }
    }
}
