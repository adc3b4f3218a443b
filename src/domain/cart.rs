// src/domain/cart.rs
//
// The cart and pricing engine. All arithmetic here is synchronous and
// derived on read; nothing is cached. Coupon validation itself lives
// behind the CouponRepository port; the cart only stores the validated
// result and guards against late responses.

use rust_decimal::Decimal;

use crate::domain::errors::{CouponError, CouponResult};
use crate::domain::models::{Coupon, DiscountType, LineItem, OrderLine, PricedOrder, Product};

/// An in-memory shopping cart: ordered line items (insertion order is
/// display order) plus at most one applied coupon.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<LineItem>,
    coupon: Option<Coupon>,
    coupon_error: Option<String>,
    // Monotonic ticket for in-flight coupon validations. A response is
    // applied only if its ticket still matches; removing the coupon or
    // starting a newer validation bumps it, so late responses are dropped.
    coupon_seq: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `product`. An existing line for the same product
    /// id has its quantity incremented in place (position unchanged);
    /// otherwise a new line with quantity 1 is appended.
    pub fn add_item(&mut self, product: Product) {
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(LineItem::new(product)),
        }
    }

    /// Adjusts a line's quantity by `delta` (any integer). Unknown ids are
    /// a no-op: the UI may race with a removal. A resulting quantity of
    /// zero or below removes the line outright; there is no zero-quantity
    /// visible state. In-place changes never reorder lines.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) {
        let Some(index) = self.lines.iter().position(|l| l.product.id == product_id) else {
            return;
        };
        let new_quantity = i64::from(self.lines[index].quantity) + delta;
        if new_quantity > 0 {
            self.lines[index].quantity = new_quantity.min(i64::from(u32::MAX)) as u32;
        } else {
            self.lines.remove(index);
        }
    }

    /// Removes the line for `product_id` if present; no-op otherwise.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Sum of price x quantity over all lines, full precision.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Total units in the cart (badge count), not the number of lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Discount from the applied coupon, full precision. A fixed coupon
    /// is its face value even when that exceeds the subtotal; clamping
    /// happens in `total()`, not here.
    pub fn discount(&self) -> Decimal {
        match &self.coupon {
            None => Decimal::ZERO,
            Some(coupon) => match coupon.discount_type {
                DiscountType::Percentage => {
                    self.subtotal() * coupon.discount_value / Decimal::from(100)
                }
                DiscountType::Fixed => coupon.discount_value,
            },
        }
    }

    /// Subtotal minus discount, floor-clamped at zero. An oversized fixed
    /// coupon never produces a negative payable amount.
    pub fn total(&self) -> Decimal {
        (self.subtotal() - self.discount()).max(Decimal::ZERO)
    }

    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Last coupon validation message, if the most recent attempt failed.
    pub fn coupon_error(&self) -> Option<&str> {
        self.coupon_error.as_deref()
    }

    pub fn set_coupon_error(&mut self, message: String) {
        self.coupon_error = Some(message);
    }

    /// Stores a validated coupon, superseding any previous one (a single
    /// discount is active at a time; no stacking) and clearing any error.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        self.coupon = Some(coupon);
        self.coupon_error = None;
    }

    /// Clears the applied coupon and any error message, and invalidates
    /// in-flight validation requests so a slow response for an earlier
    /// code cannot resurrect the discount.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
        self.coupon_error = None;
        self.coupon_seq += 1;
    }

    /// Starts a coupon validation attempt and returns its ticket. Any
    /// previously issued ticket becomes stale.
    pub fn begin_coupon_request(&mut self) -> u64 {
        self.coupon_seq += 1;
        self.coupon_seq
    }

    /// Applies the outcome of a validation request, provided `ticket` is
    /// still the current one. A stale ticket discards the outcome without
    /// touching cart state. On rejection or service failure the previously
    /// applied coupon (if any) stays intact; only the error message is
    /// updated, so a failed second attempt never destroys a valid first
    /// coupon. Line items are never affected.
    pub fn resolve_coupon_request(
        &mut self,
        ticket: u64,
        outcome: CouponResult<Coupon>,
    ) -> CouponResult<()> {
        if ticket != self.coupon_seq {
            return Err(CouponError::Superseded);
        }
        match outcome {
            Ok(coupon) => {
                self.apply_coupon(coupon);
                Ok(())
            }
            Err(err) => {
                self.coupon_error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Builds the priced order handed to the checkout service. The caller
    /// supplies `customer_email` (the identity provider's address or the
    /// configured guest placeholder); the engine never reads ambient
    /// session state.
    pub fn build_order(&self, customer_email: &str) -> PricedOrder {
        let items = self
            .lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product.id.clone(),
                name: l.product.name.clone(),
                quantity: l.quantity,
                price: l.product.price,
                product_type: l.product.product_type,
            })
            .collect();

        PricedOrder {
            items,
            subtotal: self.subtotal(),
            discount_amount: self.discount(),
            total: self.total(),
            customer_email: customer_email.to_string(),
            coupon_code: self.coupon.as_ref().map(|c| c.code.clone()),
        }
    }
}
