//! Unified error handling for the storefront core.
//!
//! Expected user-input states (incomplete selection, unknown postal code) are
//! modeled as typed results in their own modules, never as panics. This type
//! aggregates the terminal failures a caller may need to surface.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::shipping::ShippingError;
use crate::variant::SelectionError;

/// Top-level error type for storefront operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog fetch or validation failed. Terminal for the page view.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Shipping estimation failed.
    #[error("Shipping error: {0}")]
    Shipping(#[from] ShippingError),

    /// Selection update rejected.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
