//! Domain error types.

use thiserror::Error;

use crate::catalog::MedicineId;
use crate::order::{OrderId, OrderStatus};

/// Errors that can occur in domain operations.
///
/// Validation variants are rejected before any state changes; not-found
/// variants surface explicitly and are never silently substituted.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Quantity must be at least one unit and keep the line total in range.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: u32 },

    /// A medicine field failed catalog validation.
    #[error("Invalid medicine field: {field}")]
    InvalidMedicine { field: &'static str },

    /// An address field failed validation.
    #[error("Invalid address field: {field}")]
    InvalidAddress { field: &'static str },

    /// Medicine not found in the catalog.
    #[error("Medicine not found: {medicine_id}")]
    MedicineNotFound { medicine_id: MedicineId },

    /// A medicine with this id already exists in the catalog.
    #[error("Medicine already exists: {medicine_id}")]
    MedicineAlreadyExists { medicine_id: MedicineId },

    /// No cart line exists for this medicine.
    #[error("No cart line for medicine: {medicine_id}")]
    LineNotFound { medicine_id: MedicineId },

    /// Orders cannot be placed from an empty cart.
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,

    /// Order not found in the order table.
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    /// The requested status change is not the single legal next step.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
