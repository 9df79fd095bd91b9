//! Order lifecycle: entity, status state machine, address.

mod address;
mod entity;
mod state;

pub use address::{Address, AddressKind};
pub use entity::{DELIVERY_ESTIMATE, Order, OrderId};
pub use state::{OrderStatus, progress_hint};
