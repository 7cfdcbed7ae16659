//! Validation utilities for the Kitchen Command inventory platform

use rust_decimal::Decimal;

use crate::models::ProductDraft;
use crate::types::DateRange;

// ============================================================================
// Inventory Validations
// ============================================================================

/// Clamp a requested stock level to the non-negative range
pub fn clamp_stock(requested: i64) -> i64 {
    requested.max(0)
}

/// Validate that a sale quantity is a positive integer
pub fn validate_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate that a price is non-negative
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate a product draft before it enters the catalog
pub fn validate_product_draft(draft: &ProductDraft) -> Result<(), &'static str> {
    if draft.name.trim().is_empty() {
        return Err("Product name cannot be empty");
    }
    validate_price(draft.price)?;
    Ok(())
}

// ============================================================================
// Report Validations
// ============================================================================

/// Validate that a report date range is ordered
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if range.start > range.end {
        return Err("Start date must not be after end date");
    }
    Ok(())
}
