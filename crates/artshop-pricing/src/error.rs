//! Pricing error types.
//!
//! The calculator itself never fails. These cover the checked edges:
//! re-verifying a client payload and decoding it.

use thiserror::Error;

/// Errors raised outside the advisory calculation.
#[derive(Error, Debug)]
pub enum PricingError {
    /// A submitted option is not offered for the product.
    #[error("Option not offered: {group} = {label}")]
    UnknownOption { group: String, label: String },

    /// The client's unit price disagrees with the catalog.
    #[error("Unit price mismatch for {sku}: client sent {claimed}, catalog gives {expected}")]
    UnitPriceMismatch {
        sku: String,
        claimed: String,
        expected: String,
    },

    /// A tax rate outside 0-100 or not a number.
    #[error("Invalid {field} rate: {value}")]
    InvalidRate { field: &'static str, value: f64 },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::SerializationError(e.to_string())
    }
}
