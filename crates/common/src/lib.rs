//! Shared types used across the storefront workspace.
//!
//! Identity resolution itself lives behind the auth collaborator port;
//! this crate only defines the records that flow between layers.

pub mod types;

pub use types::{Identity, Role, Scope, UserId};
