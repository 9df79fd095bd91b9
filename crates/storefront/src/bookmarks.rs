//! Bookmark service: scope-keyed saved-medicine lists.

use common::Scope;
use domain::{BookmarkSet, MedicineId};
use store::{StateStore, StateStoreExt, StoreKey};

use crate::catalog::CatalogService;
use crate::error::Result;

/// Bookmark operations for an acting scope.
///
/// Same load/persist pattern as the cart: read fresh per call, write only
/// when the set actually changed.
#[derive(Debug, Clone)]
pub struct BookmarkService<S> {
    store: S,
    catalog: CatalogService<S>,
}

impl<S: StateStore + Clone> BookmarkService<S> {
    /// Creates a bookmark service over the given store.
    pub fn new(store: S) -> Self {
        let catalog = CatalogService::new(store.clone());
        Self { store, catalog }
    }

    async fn load(&self, scope: &Scope) -> Result<BookmarkSet> {
        Ok(self
            .store
            .get_json(&StoreKey::bookmarks(scope.clone()))
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, scope: &Scope, bookmarks: &BookmarkSet) -> Result<()> {
        Ok(self
            .store
            .put_json(&StoreKey::bookmarks(scope.clone()), bookmarks)
            .await?)
    }

    /// Returns the scope's bookmarks in insertion order.
    pub async fn list(&self, scope: &Scope) -> Result<BookmarkSet> {
        self.load(scope).await
    }

    /// Bookmarks a medicine. Idempotent; the id must exist in the catalog.
    #[tracing::instrument(skip(self), fields(scope = %scope, medicine_id = %medicine_id))]
    pub async fn add(&self, scope: &Scope, medicine_id: &MedicineId) -> Result<BookmarkSet> {
        self.catalog.get(medicine_id).await?;
        let mut bookmarks = self.load(scope).await?;
        if bookmarks.add(medicine_id.clone()) {
            self.save(scope, &bookmarks).await?;
        }
        Ok(bookmarks)
    }

    /// Removes a bookmark. Idempotent: absent ids are a quiet no-op.
    #[tracing::instrument(skip(self), fields(scope = %scope, medicine_id = %medicine_id))]
    pub async fn remove(&self, scope: &Scope, medicine_id: &MedicineId) -> Result<BookmarkSet> {
        let mut bookmarks = self.load(scope).await?;
        if bookmarks.remove(medicine_id) {
            self.save(scope, &bookmarks).await?;
        }
        Ok(bookmarks)
    }

    /// Returns true if the scope has bookmarked the medicine.
    pub async fn contains(&self, scope: &Scope, medicine_id: &MedicineId) -> Result<bool> {
        Ok(self.load(scope).await?.contains(medicine_id))
    }
}
