//! Small helpers for building `InvalidParameters` errors consistently.

use wayfare_core::{Error, Result};

/// Build an `InvalidParameters` error for `field`.
pub fn invalid_parameters(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidParameters {
        field,
        reason: reason.into(),
    }
}

/// Require a strictly positive, finite number.
///
/// # Errors
///
/// `InvalidParameters` naming `field` otherwise.
pub fn positive_finite(value: f64, field: &'static str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid_parameters(
            field,
            format!("must be a positive number, got {value}"),
        ))
    }
}

/// Require `value <= max` (the documented range ceiling for the field).
///
/// # Errors
///
/// `InvalidParameters` naming `field` otherwise.
pub fn within(value: f64, max: f64, field: &'static str) -> Result<()> {
    if value <= max {
        Ok(())
    } else {
        Err(invalid_parameters(
            field,
            format!("must be at most {max}, got {value}"),
        ))
    }
}

/// Map a checked-arithmetic `None` to an `InvalidParameters` overflow error.
///
/// # Errors
///
/// `InvalidParameters` when `value` is `None`.
pub fn no_overflow<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| invalid_parameters(field, "amount overflows"))
}
