//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// One variant per rule family of the catalog. Every check is fail-fast, so an
/// error always names the first rule that was violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// SKU missing or too short.
    #[error("invalid sku: {0}")]
    InvalidSku(String),

    /// Name, description or image URL missing/malformed.
    #[error("invalid product: {0}")]
    InvalidProduct(String),

    /// A kit item lacks its product reference or points at its own kit.
    #[error("invalid kit item: {0}")]
    InvalidItemKit(String),

    /// A kit-wide rule failed (self-reference or aggregate price minimum).
    #[error("invalid kit item list: {0}")]
    InvalidItemKitList(String),

    /// A price value object was inconsistent (e.g. discount above list price).
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_sku(msg: impl Into<String>) -> Self {
        Self::InvalidSku(msg.into())
    }

    pub fn invalid_product(msg: impl Into<String>) -> Self {
        Self::InvalidProduct(msg.into())
    }

    pub fn invalid_item_kit(msg: impl Into<String>) -> Self {
        Self::InvalidItemKit(msg.into())
    }

    pub fn invalid_item_kit_list(msg: impl Into<String>) -> Self {
        Self::InvalidItemKitList(msg.into())
    }

    pub fn invalid_price(msg: impl Into<String>) -> Self {
        Self::InvalidPrice(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
