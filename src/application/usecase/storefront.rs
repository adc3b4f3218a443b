// src/application/usecase/storefront.rs
// Storefront orchestration: catalog listing, coupon application and the
// checkout handoff. Holds the ports; owns no pricing arithmetic of its
// own beyond what the cart derives.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::Cart;
use crate::domain::errors::{CatalogResult, CheckoutError, CheckoutResult, CouponError, CouponResult};
use crate::domain::models::{CheckoutHandoff, Product, ProductType, Session};
use crate::domain::repository::{CatalogRepository, CheckoutRepository, CouponRepository};

#[async_trait]
pub trait StorefrontUseCase {
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// Validates `raw_code` against the coupon service and applies the
    /// result to the cart. Blank input fails locally without a service
    /// call; rejections leave any previously applied coupon intact.
    async fn apply_coupon(&self, cart: &mut Cart, raw_code: &str) -> CouponResult<()>;

    /// Hands the priced cart to the checkout service. On any failure the
    /// cart is untouched and the customer can retry without re-adding
    /// items.
    async fn checkout(&self, cart: &Cart, session: &Session) -> CheckoutResult<CheckoutHandoff>;
}

pub struct Storefront {
    catalog: Arc<dyn CatalogRepository>,
    coupons: Arc<dyn CouponRepository>,
    checkout: Arc<dyn CheckoutRepository>,
    guest_email: String,
}

impl Storefront {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        coupons: Arc<dyn CouponRepository>,
        checkout: Arc<dyn CheckoutRepository>,
        guest_email: &str,
    ) -> Self {
        Self {
            catalog,
            coupons,
            checkout,
            guest_email: guest_email.to_string(),
        }
    }
}

#[async_trait]
impl StorefrontUseCase for Storefront {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let products = self.catalog.list_products().await?;
        log::debug!("Catalog returned {} products", products.len());
        Ok(products)
    }

    async fn apply_coupon(&self, cart: &mut Cart, raw_code: &str) -> CouponResult<()> {
        // Codes are case-insensitive: uppercased before validation and
        // storage so "save5" and "SAVE5" are the same coupon.
        let code = raw_code.trim().to_uppercase();
        if code.is_empty() {
            let err = CouponError::EmptyCode;
            cart.set_coupon_error(err.user_message());
            return Err(err);
        }

        let ticket = cart.begin_coupon_request();
        let subtotal = cart.subtotal();
        log::info!("Validating coupon {} against subtotal {}", code, subtotal);

        let outcome = self.coupons.validate(&code, subtotal).await;
        match cart.resolve_coupon_request(ticket, outcome) {
            Ok(()) => {
                log::info!("Coupon {} applied", code);
                Ok(())
            }
            Err(err) => {
                log::warn!("Coupon {} not applied: {}", code, err);
                Err(err)
            }
        }
    }

    async fn checkout(&self, cart: &Cart, session: &Session) -> CheckoutResult<CheckoutHandoff> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let email = session
            .email
            .clone()
            .unwrap_or_else(|| self.guest_email.clone());
        let order = cart.build_order(&email);

        log::info!(
            "Checking out {} line(s), total {} for {}",
            order.items.len(),
            order.total,
            order.customer_email
        );

        let handoff = self.checkout.create_order(&order).await?;
        log::info!("Order created, approval URL ready");
        Ok(handoff)
    }
}

/// Shop-tab filtering over the catalog response. Filtering is a
/// presentation concern applied to the full list; the catalog contract
/// has no filter parameters.
pub fn filter_by_type(products: &[Product], product_type: ProductType) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.product_type == product_type)
        .cloned()
        .collect()
}

pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category.eq_ignore_ascii_case(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{CatalogError, CouponResult};
    use crate::domain::models::{Coupon, DiscountType, PricedOrder};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct FakeCatalog;

    #[async_trait]
    impl CatalogRepository for FakeCatalog {
        async fn list_products(&self) -> CatalogResult<Vec<Product>> {
            Err(CatalogError::Service("unused".into()))
        }
    }

    /// Records received codes; knows a single 10% coupon named SAVE10.
    struct FakeCoupons {
        calls: AtomicU32,
        seen_codes: Mutex<Vec<String>>,
    }

    impl FakeCoupons {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
                seen_codes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CouponRepository for FakeCoupons {
        async fn validate(&self, code: &str, _order_total: Decimal) -> CouponResult<Coupon> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_codes.lock().unwrap().push(code.to_string());
            if code == "SAVE10" {
                Ok(Coupon {
                    code: code.to_string(),
                    discount_type: DiscountType::Percentage,
                    discount_value: dec!(10),
                })
            } else {
                Err(CouponError::Rejected("Invalid coupon code".into()))
            }
        }
    }

    struct FakeCheckout {
        approve: bool,
    }

    #[async_trait]
    impl CheckoutRepository for FakeCheckout {
        async fn create_order(&self, order: &PricedOrder) -> CheckoutResult<CheckoutHandoff> {
            if self.approve {
                Ok(CheckoutHandoff {
                    approval_url: format!("https://pay.example/approve?total={}", order.total),
                    order_id: Some("order-1".into()),
                })
            } else {
                Err(CheckoutError::NoApprovalUrl)
            }
        }
    }

    fn storefront(coupons: Arc<FakeCoupons>, approve: bool) -> Storefront {
        Storefront::new(
            Arc::new(FakeCatalog),
            coupons,
            Arc::new(FakeCheckout { approve }),
            "guest@apebrain.cloud",
        )
    }

    fn sample_product(id: &str, price: Decimal) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {}", id),
            price,
            product_type: ProductType::Physical,
            category: "Supplements".into(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn coupon_codes_are_trimmed_and_uppercased() {
        let coupons = Arc::new(FakeCoupons::new());
        let shop = storefront(coupons.clone(), true);
        let mut cart = Cart::new();
        cart.add_item(sample_product("phys-1", dec!(29.99)));

        shop.apply_coupon(&mut cart, "  save10 ").await.unwrap();

        assert_eq!(coupons.seen_codes.lock().unwrap().as_slice(), ["SAVE10"]);
        assert_eq!(cart.applied_coupon().unwrap().code, "SAVE10");
        assert!(cart.coupon_error().is_none());
    }

    #[tokio::test]
    async fn blank_code_fails_locally_without_a_service_call() {
        let coupons = Arc::new(FakeCoupons::new());
        let shop = storefront(coupons.clone(), true);
        let mut cart = Cart::new();
        cart.add_item(sample_product("phys-1", dec!(29.99)));

        let result = shop.apply_coupon(&mut cart, "   ").await;

        assert!(matches!(result, Err(CouponError::EmptyCode)));
        assert_eq!(coupons.calls.load(Ordering::SeqCst), 0);
        assert_eq!(cart.coupon_error(), Some("Please enter a coupon code"));
        assert!(cart.applied_coupon().is_none());
    }

    #[tokio::test]
    async fn rejected_coupon_leaves_pricing_and_previous_coupon_intact() {
        let coupons = Arc::new(FakeCoupons::new());
        let shop = storefront(coupons.clone(), true);
        let mut cart = Cart::new();
        cart.add_item(sample_product("phys-1", dec!(50.00)));

        shop.apply_coupon(&mut cart, "SAVE10").await.unwrap();
        let result = shop.apply_coupon(&mut cart, "BOGUS").await;

        assert!(matches!(result, Err(CouponError::Rejected(_))));
        assert_eq!(cart.applied_coupon().unwrap().code, "SAVE10");
        assert_eq!(cart.total(), dec!(45.00));
        assert_eq!(cart.coupon_error(), Some("Invalid coupon code"));
    }

    #[tokio::test]
    async fn checkout_uses_guest_email_for_anonymous_sessions() {
        let shop = storefront(Arc::new(FakeCoupons::new()), true);
        let mut cart = Cart::new();
        cart.add_item(sample_product("phys-1", dec!(29.99)));

        let handoff = shop.checkout(&cart, &Session::guest()).await.unwrap();
        assert!(handoff.approval_url.starts_with("https://pay.example/"));
    }

    #[tokio::test]
    async fn checkout_failure_preserves_the_cart_for_retry() {
        let shop = storefront(Arc::new(FakeCoupons::new()), false);
        let mut cart = Cart::new();
        cart.add_item(sample_product("phys-1", dec!(29.99)));
        cart.add_item(sample_product("phys-1", dec!(29.99)));
        let total_before = cart.total();

        let result = shop.checkout(&cart, &Session::registered("kim@example.com")).await;

        assert!(matches!(result, Err(CheckoutError::NoApprovalUrl)));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), total_before);
    }

    #[tokio::test]
    async fn empty_cart_cannot_check_out() {
        let shop = storefront(Arc::new(FakeCoupons::new()), true);
        let cart = Cart::new();
        let result = shop.checkout(&cart, &Session::guest()).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn shop_tabs_split_catalog_by_type() {
        let mut digital = sample_product("digi-1", dec!(19.99));
        digital.product_type = ProductType::Digital;
        digital.category = "eBooks".into();
        let products = vec![
            sample_product("phys-1", dec!(29.99)),
            digital,
            sample_product("phys-2", dec!(24.99)),
        ];

        let physical = filter_by_type(&products, ProductType::Physical);
        assert_eq!(physical.len(), 2);
        let ebooks = filter_by_category(&products, "ebooks");
        assert_eq!(ebooks.len(), 1);
        assert_eq!(ebooks[0].id, "digi-1");
    }
}
