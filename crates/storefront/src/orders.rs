//! Order placement and back-office lifecycle operations.

use chrono::{DateTime, Utc};
use domain::{Address, CartLine, DomainError, Money, Order, OrderId, OrderStatus, progress_hint};
use rand::Rng;
use serde::Serialize;
use store::{StateStore, StateStoreExt, StoreKey};
use tokio::time::{Duration, sleep};

use crate::activity::{ActivityCategory, ActivityLog};
use crate::error::{Result, StorefrontError};
use crate::services::notification::NotificationService;

/// Attempts at drawing an unused order number before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

/// Delivery attempts for the confirmation notification.
const NOTIFY_ATTEMPTS: u32 = 3;

/// Pause between confirmation delivery attempts.
const NOTIFY_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Tracking view data for one order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderTracking {
    pub order_id: OrderId,
    /// Authoritative status, moved only by the back office.
    pub status: OrderStatus,
    /// Time-derived cosmetic stage.
    pub hint: OrderStatus,
    /// What tracking views show: whichever of the two is further along.
    pub display_status: OrderStatus,
    pub delivery_estimate: String,
    pub created_at: DateTime<Utc>,
}

/// Places orders and manages their lifecycle.
///
/// The whole order table lives under one store key; placement appends,
/// status changes rewrite in place. Confirmation notifications are sent
/// on a background task and never affect placement.
#[derive(Debug, Clone)]
pub struct OrderService<S, N> {
    store: S,
    activity: ActivityLog<S>,
    notifier: N,
}

impl<S, N> OrderService<S, N>
where
    S: StateStore + Clone,
    N: NotificationService + Clone + 'static,
{
    /// Creates an order service over the given store and notifier.
    pub fn new(store: S, notifier: N) -> Self {
        let activity = ActivityLog::new(store.clone());
        Self {
            store,
            activity,
            notifier,
        }
    }

    async fn load(&self) -> Result<Vec<Order>> {
        Ok(self
            .store
            .get_json(&StoreKey::Orders)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, orders: Vec<Order>) -> Result<()> {
        Ok(self.store.put_json(&StoreKey::Orders, &orders).await?)
    }

    /// Places an order from a checkout cart snapshot.
    ///
    /// The snapshot carries the add-time prices; the caller clears the
    /// live cart once placement succeeds. The order lands in `placed`
    /// with a fresh `ORD-` number.
    #[tracing::instrument(
        skip(self, lines, total_amount, address, customer_email),
        fields(lines = lines.len())
    )]
    pub async fn place_order(
        &self,
        lines: Vec<CartLine>,
        total_amount: Money,
        address: Address,
        customer_email: &str,
    ) -> Result<Order> {
        let start = std::time::Instant::now();

        if lines.is_empty() {
            return Err(DomainError::EmptyCart.into());
        }
        address.validate()?;

        let mut orders = self.load().await?;
        let order_id = allocate_order_id(&orders)?;
        let order = Order::new(
            order_id,
            lines,
            total_amount,
            address,
            customer_email,
            Utc::now(),
        );

        orders.push(order.clone());
        self.save(orders).await?;

        self.record_activity(format!(
            "Order {} placed by {}",
            order.id, order.customer_email
        ))
        .await;

        let notifier = self.notifier.clone();
        let confirmation = order.clone();
        tokio::spawn(async move {
            send_confirmation(notifier, confirmation).await;
        });

        metrics::counter!("orders_placed_total").increment(1);
        metrics::histogram!("order_placement_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        tracing::info!(order_id = %order.id, total = %order.total_amount, "order placed");

        Ok(order)
    }

    /// Fetches a single order by id.
    pub async fn get(&self, order_id: &OrderId) -> Result<Order> {
        let orders = self.load().await?;
        orders.into_iter().find(|o| &o.id == order_id).ok_or_else(|| {
            DomainError::OrderNotFound {
                order_id: order_id.clone(),
            }
            .into()
        })
    }

    /// Returns the customer's order history, newest first.
    pub async fn orders_for(&self, email: &str) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .load()
            .await?
            .into_iter()
            .filter(|o| o.customer_email.eq_ignore_ascii_case(email))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Returns the full order table for the back office, newest first.
    pub async fn all_orders(&self) -> Result<Vec<Order>> {
        let mut orders = self.load().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Moves an order's authoritative status forward by one stage.
    ///
    /// Unknown ids and illegal transitions fail without touching the
    /// stored table.
    #[tracing::instrument(skip(self), fields(order_id = %order_id, new_status = %new_status))]
    pub async fn update_status(
        &self,
        order_id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<Order> {
        let mut orders = self.load().await?;
        let order = orders
            .iter_mut()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| DomainError::OrderNotFound {
                order_id: order_id.clone(),
            })?;

        order.transition_to(new_status)?;
        let updated = order.clone();
        self.save(orders).await?;

        self.record_activity(format!("Order {} moved to {}", updated.id, updated.status))
            .await;
        tracing::info!(order_id = %updated.id, status = %updated.status, "order status updated");
        Ok(updated)
    }

    /// Builds the tracking view for an order at the given instant.
    pub async fn tracking(&self, order_id: &OrderId, now: DateTime<Utc>) -> Result<OrderTracking> {
        let order = self.get(order_id).await?;
        let hint = progress_hint(order.created_at, now);
        let display_status = order.display_status(now);
        Ok(OrderTracking {
            order_id: order.id,
            status: order.status,
            hint,
            display_status,
            delivery_estimate: order.delivery_estimate,
            created_at: order.created_at,
        })
    }

    // Activity entries are side effects of an already-completed
    // operation; a failed write is logged and swallowed.
    async fn record_activity(&self, message: String) {
        if let Err(error) = self
            .activity
            .record(ActivityCategory::OrderStatus, message)
            .await
        {
            tracing::warn!(%error, "failed to record activity entry");
        }
    }
}

fn allocate_order_id(orders: &[Order]) -> Result<OrderId> {
    let mut rng = rand::thread_rng();
    for _ in 0..MAX_ID_ATTEMPTS {
        let number: u32 = rng.gen_range(0..1_000_000);
        let candidate = OrderId::new(format!("ORD-{number:06}"));
        if !orders.iter().any(|o| o.id == candidate) {
            return Ok(candidate);
        }
    }
    Err(StorefrontError::OrderIdSpaceExhausted)
}

/// Delivers the confirmation, retrying a bounded number of times.
///
/// Runs on a spawned task; the placement has already succeeded, so the
/// terminal failure is a metric and a warning, never an error return.
async fn send_confirmation<N: NotificationService>(notifier: N, order: Order) {
    for attempt in 1..=NOTIFY_ATTEMPTS {
        match notifier.notify_order_confirmed(&order).await {
            Ok(()) => {
                tracing::debug!(order_id = %order.id, attempt, "order confirmation sent");
                return;
            }
            Err(error) if attempt < NOTIFY_ATTEMPTS => {
                tracing::debug!(order_id = %order.id, attempt, %error, "retrying confirmation");
                sleep(NOTIFY_RETRY_DELAY).await;
            }
            Err(error) => {
                metrics::counter!("order_notifications_failed_total").increment(1);
                tracing::warn!(order_id = %order.id, %error, "confirmation failed after retries");
            }
        }
    }
}
