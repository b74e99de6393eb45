//! Shared primitive types used across the calculator.

/// Whole hours, as shown on the KPI cards and charts.
pub type Hours = i64;

/// Whole monetary units (monthly), as shown on the KPI cards and charts.
pub type Money = i64;

/// Free-form profile identifier as received from the presentation layer.
/// May name a profile that is not in the catalog.
pub type ProfileKey = String;
