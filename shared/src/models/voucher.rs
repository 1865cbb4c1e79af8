//! Voucher Model

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Discount rule kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoucherType {
    /// `value` is a percentage of the subtotal (0-100)
    Percentage,
    /// `value` is a fixed amount
    Fixed,
}

/// A discount voucher, applied transiently to a cart.
///
/// Only the resulting discount amount is persisted with the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voucher {
    pub code: String,
    pub voucher_type: VoucherType,
    pub value: f64,
    /// Minimum subtotal for the voucher to apply
    pub min_spend: f64,
    /// RFC 3339; voucher is invalid after this instant
    pub expiry_date: String,
    pub is_active: bool,
}

impl Voucher {
    /// Whether this voucher may be applied to a cart with the given
    /// subtotal at time `now` (RFC 3339).
    ///
    /// Expiry is compared as instants, not strings; offsets other than
    /// UTC would defeat a lexicographic comparison. An unparseable
    /// expiry makes the voucher inapplicable.
    pub fn is_applicable(&self, subtotal: f64, now: &str) -> bool {
        if !self.is_active || subtotal < self.min_spend {
            return false;
        }
        match (
            DateTime::parse_from_rfc3339(now),
            DateTime::parse_from_rfc3339(&self.expiry_date),
        ) {
            (Ok(now), Ok(expiry)) => now < expiry,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voucher(min_spend: f64, active: bool, expiry: &str) -> Voucher {
        Voucher {
            code: "SAVE10".into(),
            voucher_type: VoucherType::Percentage,
            value: 10.0,
            min_spend,
            expiry_date: expiry.into(),
            is_active: active,
        }
    }

    #[test]
    fn test_applicability() {
        let v = voucher(5000.0, true, "2099-01-01T00:00:00+00:00");
        let now = "2026-01-01T00:00:00+00:00";
        assert!(v.is_applicable(9000.0, now));
        assert!(!v.is_applicable(4999.0, now));
        assert!(!voucher(0.0, false, "2099-01-01T00:00:00+00:00").is_applicable(9000.0, now));
        assert!(!voucher(0.0, true, "2020-01-01T00:00:00+00:00").is_applicable(9000.0, now));
    }

    #[test]
    fn test_expiry_compares_instants_across_offsets() {
        // 20:00+07:00 is 13:00 UTC; one hour later in UTC it is expired
        let v = voucher(0.0, true, "2026-08-30T20:00:00+07:00");
        assert!(!v.is_applicable(9000.0, "2026-08-30T14:00:00+00:00"));
        assert!(v.is_applicable(9000.0, "2026-08-30T12:00:00+00:00"));
    }

    #[test]
    fn test_unparseable_expiry_is_inapplicable() {
        assert!(!voucher(0.0, true, "not-a-date").is_applicable(9000.0, "2026-01-01T00:00:00+00:00"));
    }
}
