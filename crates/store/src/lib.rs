//! Persistence gateway for the storefront.
//!
//! Exposes an abstract key-value [`StateStore`] keyed by [`StoreKey`]
//! (identity-qualified keys for carts and bookmarks, global keys for the
//! catalog, the order table, and the activity log), with an in-memory
//! implementation for tests and dev mode and a PostgreSQL implementation
//! for deployment.

pub mod error;
pub mod key;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use key::StoreKey;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::{StateStore, StateStoreExt};
