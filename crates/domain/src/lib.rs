//! Domain core for the generic-medicine storefront.
//!
//! This crate provides the pure business logic:
//! - Medicine catalog entities and the built-in seed list
//! - Pricing engine with the centralized bulk-discount tiers
//! - Cart with add-time price snapshots and derived totals
//! - Bookmark set
//! - Order lifecycle: entity, status state machine, progress hint
//!
//! Persistence and collaborators live in the `store` and `storefront`
//! crates; nothing here performs I/O.

pub mod bookmarks;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;

pub use bookmarks::BookmarkSet;
pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{Category, Medicine, MedicineId, seed_medicines};
pub use error::DomainError;
pub use money::Money;
pub use order::{
    Address, AddressKind, DELIVERY_ESTIMATE, Order, OrderId, OrderStatus, progress_hint,
};
pub use pricing::{PriceQuote, discount_percent_for, quote};
