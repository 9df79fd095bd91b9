//! Notification service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Order, OrderId};
use thiserror::Error;

/// Errors returned by notification channels.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The channel rejected or failed to deliver the message.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Trait for customer-facing order notifications.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Sends an order confirmation to the customer.
    async fn notify_order_confirmed(&self, order: &Order) -> Result<(), NotificationError>;
}

/// A confirmation recorded by the in-memory service.
#[derive(Debug, Clone)]
pub struct SentConfirmation {
    pub order_id: OrderId,
    pub email: String,
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    confirmations: Vec<SentConfirmation>,
    attempts: u32,
    fail_on_send: bool,
}

/// In-memory notification service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationService {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

impl InMemoryNotificationService {
    /// Creates a new in-memory notification service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail every send call.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the number of confirmations delivered.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().confirmations.len()
    }

    /// Returns the number of send attempts, including failed ones.
    pub fn attempt_count(&self) -> u32 {
        self.state.read().unwrap().attempts
    }

    /// Returns true if a confirmation was delivered for the given order.
    pub fn has_confirmation_for(&self, order_id: &OrderId) -> bool {
        self.state
            .read()
            .unwrap()
            .confirmations
            .iter()
            .any(|c| &c.order_id == order_id)
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn notify_order_confirmed(&self, order: &Order) -> Result<(), NotificationError> {
        let mut state = self.state.write().unwrap();
        state.attempts += 1;

        if state.fail_on_send {
            return Err(NotificationError::Delivery(
                "notification channel unavailable".to_string(),
            ));
        }

        state.confirmations.push(SentConfirmation {
            order_id: order.id.clone(),
            email: order.customer_email.clone(),
        });
        Ok(())
    }
}
