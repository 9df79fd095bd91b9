//! Order status state machine and the cosmetic progress hint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Transitions run strictly forward, one step at a time:
/// ```text
/// Placed ──► Packed ──► OutForDelivery ──► Delivered
/// ```
/// No skipping, no reverse transitions. Variant order is the lifecycle
/// order, so the derived `Ord` compares progress.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created; the only initial status.
    #[default]
    Placed,

    /// Order packed and ready for dispatch.
    Packed,

    /// Order handed to the delivery partner.
    OutForDelivery,

    /// Order delivered (terminal status).
    Delivered,
}

impl OrderStatus {
    /// Returns the next status in the lifecycle, or None at the end.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Packed),
            OrderStatus::Packed => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Returns true if `target` is the single legal next status.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.next() == Some(target)
    }

    /// Returns true if this is the terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Packed => "packed",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Elapsed time after which tracking views show the order as packed.
const PACKED_HINT_SECS: i64 = 60 * 60;

/// Elapsed time after which tracking views show the order as out for
/// delivery.
const OUT_FOR_DELIVERY_HINT_SECS: i64 = 6 * 60 * 60;

/// Derives the cosmetic, display-only progress stage for tracking views.
///
/// This is NOT the authoritative status: it is a time-based estimate
/// that advances through the first two post-placement steps and never
/// reaches `Delivered`. Only the explicit admin operation changes the
/// persisted status.
pub fn progress_hint(created_at: DateTime<Utc>, now: DateTime<Utc>) -> OrderStatus {
    let elapsed = (now - created_at).num_seconds();
    if elapsed >= OUT_FOR_DELIVERY_HINT_SECS {
        OrderStatus::OutForDelivery
    } else if elapsed >= PACKED_HINT_SECS {
        OrderStatus::Packed
    } else {
        OrderStatus::Placed
    }
}
