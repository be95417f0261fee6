//! Shared primitive types used across the crate.

/// A stable, unique order identifier (`ORD10000`, `ORD10001`, ...).
pub type OrderId = String;

/// A monetary amount in rupees. Stored amounts are rounded to paise.
pub type Amount = f64;
