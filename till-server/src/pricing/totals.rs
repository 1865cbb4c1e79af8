//! Totals computation
//!
//! Pure arithmetic over cart lines: no clock, no catalog, no I/O. Line
//! prices come from the snapshots frozen into the cart, so a menu price
//! edit mid-order never moves an existing cart's total.

use serde::Serialize;

use shared::models::{CartItem, Voucher, VoucherType};

/// Computed totals for a cart or finalized order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

/// Compute totals for the given lines.
///
/// `now` is an RFC 3339 timestamp used for voucher expiry; pass the
/// current time in production. A voucher that does not apply (inactive,
/// under minimum spend, expired) contributes zero discount rather than
/// erroring, matching how the till presents it. The grand total never
/// goes below zero however generous the voucher.
pub fn compute_totals(
    items: &[CartItem],
    voucher: Option<&Voucher>,
    tax_rate: f64,
    now: &str,
) -> Totals {
    let subtotal: f64 = items.iter().map(|l| l.line_total()).sum();
    let tax = subtotal * tax_rate;

    let discount = match voucher {
        Some(v) if v.is_applicable(subtotal, now) => match v.voucher_type {
            VoucherType::Percentage => subtotal * v.value / 100.0,
            // Recorded raw even past the subtotal; only the grand
            // total is floored at zero.
            VoucherType::Fixed => v.value,
        },
        _ => 0.0,
    };

    let total = (subtotal + tax - discount).max(0.0);
    Totals {
        subtotal,
        tax,
        discount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use shared::models::CartItem;

    const NOW: &str = "2026-08-30T12:00:00Z";

    fn lines() -> Vec<CartItem> {
        let menu = seed::initial_menu();
        let mut burger = CartItem::new(menu.iter().find(|m| m.id == "m1").unwrap().clone());
        burger.quantity = 2;
        let cola = CartItem::new(menu.iter().find(|m| m.id == "m6").unwrap().clone());
        vec![burger, cola]
    }

    fn voucher(voucher_type: VoucherType, value: f64, min_spend: f64) -> Voucher {
        Voucher {
            code: "TEST".to_string(),
            voucher_type,
            value,
            min_spend,
            expiry_date: "2027-01-01T00:00:00Z".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        // 2 x 9000 + 1 x 1500
        let t = compute_totals(&lines(), None, 0.0, NOW);
        assert_eq!(t.subtotal, 19500.0);
        assert_eq!(t.tax, 0.0);
        assert_eq!(t.discount, 0.0);
        assert_eq!(t.total, 19500.0);
    }

    #[test]
    fn test_percentage_voucher() {
        let v = voucher(VoucherType::Percentage, 10.0, 0.0);
        let t = compute_totals(&lines(), Some(&v), 0.0, NOW);
        assert_eq!(t.discount, 1950.0);
        assert_eq!(t.total, 17550.0);
    }

    #[test]
    fn test_voucher_below_min_spend_is_ignored() {
        let v = voucher(VoucherType::Fixed, 1000.0, 50000.0);
        let t = compute_totals(&lines(), Some(&v), 0.0, NOW);
        assert_eq!(t.discount, 0.0);
    }

    #[test]
    fn test_expired_voucher_is_ignored() {
        let mut v = voucher(VoucherType::Fixed, 1000.0, 0.0);
        v.expiry_date = "2020-01-01T00:00:00Z".to_string();
        let t = compute_totals(&lines(), Some(&v), 0.0, NOW);
        assert_eq!(t.discount, 0.0);
    }

    #[test]
    fn test_total_never_negative() {
        let v = voucher(VoucherType::Fixed, 1_000_000.0, 0.0);
        let t = compute_totals(&lines(), Some(&v), 0.0, NOW);
        assert_eq!(t.total, 0.0);
        assert_eq!(t.discount, 1_000_000.0);
    }

    #[test]
    fn test_fixed_discount_recorded_raw_past_subtotal() {
        // 1 x 1500 line, 5000 fixed voucher
        let menu = seed::initial_menu();
        let cola = CartItem::new(menu.iter().find(|m| m.id == "m6").unwrap().clone());
        let v = voucher(VoucherType::Fixed, 5000.0, 0.0);
        let t = compute_totals(&[cola], Some(&v), 0.0, NOW);
        assert_eq!(t.discount, 5000.0);
        assert_eq!(t.total, 0.0);
    }

    #[test]
    fn test_tax_rate_applies_to_subtotal() {
        let t = compute_totals(&lines(), None, 0.05, NOW);
        assert_eq!(t.tax, 975.0);
        assert_eq!(t.total, 20475.0);
    }
}
