//! Append-only activity log backing the admin dashboard feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{StateStore, StateStoreExt, StoreKey};

use crate::error::Result;

/// Upper bound on retained entries; the oldest are dropped first.
const MAX_ENTRIES: usize = 200;

/// What kind of event an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Registration,
    Login,
    OrderStatus,
}

impl ActivityCategory {
    /// Returns a string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Registration => "registration",
            ActivityCategory::Login => "login",
            ActivityCategory::OrderStatus => "order_status",
        }
    }
}

impl std::fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single activity feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub at: DateTime<Utc>,
    pub category: ActivityCategory,
    pub message: String,
}

/// Append-only log of notable storefront events.
#[derive(Debug, Clone)]
pub struct ActivityLog<S> {
    store: S,
}

impl<S: StateStore> ActivityLog<S> {
    /// Creates an activity log over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Appends an entry, dropping the oldest beyond the retention cap.
    #[tracing::instrument(skip(self, message), fields(category = %category))]
    pub async fn record(
        &self,
        category: ActivityCategory,
        message: impl Into<String>,
    ) -> Result<()> {
        let mut entries: Vec<ActivityEntry> = self
            .store
            .get_json(&StoreKey::Activity)
            .await?
            .unwrap_or_default();

        entries.push(ActivityEntry {
            at: Utc::now(),
            category,
            message: message.into(),
        });
        if entries.len() > MAX_ENTRIES {
            let excess = entries.len() - MAX_ENTRIES;
            entries.drain(..excess);
        }

        Ok(self.store.put_json(&StoreKey::Activity, &entries).await?)
    }

    /// Returns up to `limit` entries, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let entries: Vec<ActivityEntry> = self
            .store
            .get_json(&StoreKey::Activity)
            .await?
            .unwrap_or_default();
        Ok(entries.into_iter().rev().take(limit).collect())
    }
}
