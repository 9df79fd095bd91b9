//! Application services for the generic-medicine storefront.
//!
//! This crate wires the pure domain to the state store and to the
//! collaborator ports:
//! - Catalog seeding, browsing and back-office CRUD
//! - Scope-keyed carts and bookmarks with change-only persistence
//! - Order placement with background confirmation delivery
//! - Back-office status transitions and the activity feed
//! - Ports for notifications, authentication and the health assistant

pub mod activity;
pub mod bookmarks;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod orders;
pub mod services;

pub use activity::{ActivityCategory, ActivityEntry, ActivityLog};
pub use bookmarks::BookmarkService;
pub use cart::CartService;
pub use catalog::{CatalogFilter, CatalogService};
pub use error::{Result, StorefrontError};
pub use orders::{OrderService, OrderTracking};
pub use services::{
    AssistantError, AssistantService, AuthError, AuthService, FALLBACK_REPLY,
    InMemoryAssistantService, InMemoryAuthService, InMemoryNotificationService, NotificationError,
    NotificationService, SYSTEM_PROMPT, Session,
};
