//! Storefront error types.

use domain::DomainError;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur in the application services.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Domain validation or lifecycle rule failed.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// State store error.
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// Ran out of attempts to draw an unused order number.
    #[error("Could not allocate an unused order number")]
    OrderIdSpaceExhausted,
}

/// Convenience type alias for storefront results.
pub type Result<T> = std::result::Result<T, StorefrontError>;
