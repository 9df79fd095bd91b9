//! The order entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::error::DomainError;
use crate::money::Money;

use super::address::Address;
use super::state::{OrderStatus, progress_hint};

/// Fixed delivery estimate shown on confirmations and tracking views.
pub const DELIVERY_ESTIMATE: &str = "3-5 business days";

/// Order identifier: short human-readable token, e.g. `ORD-483920`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new order ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A placed order.
///
/// Items, address, total, customer email and creation time are fixed at
/// creation; only `status` changes afterwards, and only through
/// [`Order::transition_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartLine>,
    pub total_amount: Money,
    pub address: Address,
    pub customer_email: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub delivery_estimate: String,
}

impl Order {
    /// Constructs a new order in the `placed` status.
    pub fn new(
        id: OrderId,
        items: Vec<CartLine>,
        total_amount: Money,
        address: Address,
        customer_email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            items,
            total_amount,
            address,
            customer_email: customer_email.into(),
            status: OrderStatus::Placed,
            created_at,
            delivery_estimate: DELIVERY_ESTIMATE.to_string(),
        }
    }

    /// Advances the authoritative status by exactly one lifecycle step.
    ///
    /// Skipping, reversing and repeating are rejected without mutating
    /// the order.
    pub fn transition_to(&mut self, new_status: OrderStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: new_status,
            });
        }
        self.status = new_status;
        Ok(())
    }

    /// The stage tracking views should display at `now`.
    ///
    /// Whichever is further along wins: the authoritative status or the
    /// time-based cosmetic hint. The hint alone never shows an order as
    /// delivered.
    pub fn display_status(&self, now: DateTime<Utc>) -> OrderStatus {
        self.status.max(progress_hint(self.created_at, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::AddressKind;
    use chrono::Duration;

    fn sample_address() -> Address {
        Address {
            full_name: "Ravi Kumar".to_string(),
            phone: "9876543210".to_string(),
            line: "14, MG Road".to_string(),
            city: "Bengaluru".to_string(),
            pincode: "560001".to_string(),
            kind: AddressKind::Home,
        }
    }

    fn sample_order() -> Order {
        Order::new(
            OrderId::new("ORD-123456"),
            vec![CartLine {
                medicine_id: "MED-001".into(),
                name: "Paracetamol 500mg".to_string(),
                generic_price: Money::from_paise(1450),
                strip_size: 15,
                quantity: 15,
            }],
            Money::from_paise(1450),
            sample_address(),
            "ravi@example.com",
            Utc::now(),
        )
    }

    #[test]
    fn test_new_order_is_placed() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.delivery_estimate, DELIVERY_ESTIMATE);
    }

    #[test]
    fn test_transition_walks_forward() {
        let mut order = sample_order();

        order.transition_to(OrderStatus::Packed).unwrap();
        order.transition_to(OrderStatus::OutForDelivery).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();

        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_transition_rejects_skip() {
        let mut order = sample_order();

        let result = order.transition_to(OrderStatus::OutForDelivery);

        assert!(matches!(
            result,
            Err(DomainError::InvalidStatusTransition {
                from: OrderStatus::Placed,
                to: OrderStatus::OutForDelivery,
            })
        ));
        assert_eq!(order.status, OrderStatus::Placed);
    }

    #[test]
    fn test_transition_rejects_reverse() {
        let mut order = sample_order();
        order.transition_to(OrderStatus::Packed).unwrap();

        let result = order.transition_to(OrderStatus::Placed);

        assert!(result.is_err());
        assert_eq!(order.status, OrderStatus::Packed);
    }

    #[test]
    fn test_transition_rejects_beyond_terminal() {
        let mut order = sample_order();
        order.transition_to(OrderStatus::Packed).unwrap();
        order.transition_to(OrderStatus::OutForDelivery).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();

        assert!(order.transition_to(OrderStatus::Delivered).is_err());
    }

    #[test]
    fn test_display_status_prefers_hint_when_further() {
        let order = sample_order();

        // Authoritative status still Placed, but two hours have passed
        let later = order.created_at + Duration::hours(2);
        assert_eq!(order.display_status(later), OrderStatus::Packed);
        assert_eq!(order.status, OrderStatus::Placed);
    }

    #[test]
    fn test_display_status_prefers_authoritative_when_further() {
        let mut order = sample_order();
        order.transition_to(OrderStatus::Packed).unwrap();
        order.transition_to(OrderStatus::OutForDelivery).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();

        // Minutes after creation the hint would say Placed
        let just_after = order.created_at + Duration::minutes(5);
        assert_eq!(order.display_status(just_after), OrderStatus::Delivered);
    }

    #[test]
    fn test_order_serialization_roundtrip() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }

    #[test]
    fn test_order_status_serializes_as_placed() {
        let order = sample_order();
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["status"], "placed");
    }
}
