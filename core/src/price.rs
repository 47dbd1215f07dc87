//! Money and pricing value objects.
//!
//! Amounts are cents-based to avoid floating-point drift; all arithmetic is
//! checked and overflow surfaces as `None` for the caller (the pricing
//! engine maps it to `InvalidParameters`).

use crate::service::ServiceType;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Money
// ============================================================================

/// A non-negative monetary amount in cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole dollars, or `None` on overflow.
    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Option<Self> {
        match dollars.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts with overflow checking.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Multiplies by an integer quantity with overflow checking.
    #[must_use]
    pub const fn checked_mul(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Scales by a non-negative factor, rounding to the nearest cent.
    ///
    /// Used for per-unit rates over fractional quantities (km, kg) and for
    /// surge multipliers. Returns `None` when the factor is negative,
    /// non-finite, or the result overflows.
    #[must_use]
    pub fn checked_scale(self, factor: f64) -> Option<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)] // Amounts stay far below 2^53 cents
        let scaled = (self.0 as f64 * factor).round();
        if scaled > u64::MAX as f64 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Checked above
        Some(Self(scaled as u64))
    }

    /// Divides evenly across `parts`, rounding down to whole cents.
    ///
    /// Returns `None` when `parts` is zero.
    #[must_use]
    pub const fn split_evenly(self, parts: u32) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        Some(Self(self.0 / parts as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Price breakdown
// ============================================================================

/// One itemized additive component of a price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    /// Human-readable component label ("distance", "partner commission", ...).
    pub label: String,
    /// The component amount.
    pub amount: Money,
}

impl PriceLine {
    /// Create a labelled price component.
    #[must_use]
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// The itemized result of pricing a request.
///
/// `total` equals the base plus the sum of the lines, scaled by the surge
/// multiplier when one applied. Recomputed in full on every pricing call;
/// the last computed value attached to a request is authoritative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// The service type this quote was computed for.
    pub service_type: ServiceType,
    /// Flat base amount.
    pub base: Money,
    /// Itemized additive components beyond the base.
    pub lines: Vec<PriceLine>,
    /// Surge multiplier applied to the subtotal, when the quote fell inside
    /// a peak window.
    pub surge_multiplier: Option<f64>,
    /// The authoritative total.
    pub total: Money,
    /// Per-seat share for seat-divided services, total split evenly.
    pub per_seat: Option<Money>,
}

// ============================================================================
// Settlement
// ============================================================================

/// Final actuals attached at completion, as opposed to the estimate attached
/// at pricing time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// The price actually charged.
    pub final_price: Option<Money>,
    /// Actual service duration in minutes.
    pub duration_minutes: Option<u32>,
    /// Rating placeholder (1-5), filled in by a later review flow.
    pub rating: Option<u8>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;

    #[test]
    fn scale_rounds_to_nearest_cent() {
        let rate = Money::from_cents(200);
        assert_eq!(rate.checked_scale(140.0).unwrap(), Money::from_cents(28_000));
        assert_eq!(rate.checked_scale(0.333).unwrap(), Money::from_cents(67));
    }

    #[test]
    fn scale_rejects_negative_and_non_finite() {
        let m = Money::from_cents(100);
        assert!(m.checked_scale(-1.0).is_none());
        assert!(m.checked_scale(f64::NAN).is_none());
        assert!(m.checked_scale(f64::INFINITY).is_none());
    }

    #[test]
    fn split_evenly_rejects_zero_parts() {
        assert!(Money::from_cents(100).split_evenly(0).is_none());
        assert_eq!(
            Money::from_cents(29_000).split_evenly(2).unwrap(),
            Money::from_cents(14_500)
        );
    }

    #[test]
    fn add_checks_overflow() {
        assert!(Money::from_cents(u64::MAX).checked_add(Money::from_cents(1)).is_none());
    }

    #[test]
    fn display_formats_dollars_and_cents() {
        assert_eq!(Money::from_cents(29_000).to_string(), "$290.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
    }
}
