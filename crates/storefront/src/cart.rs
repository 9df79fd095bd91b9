//! Cart service: scope-keyed carts persisted through the state store.

use common::Scope;
use domain::{Cart, MedicineId};
use store::{StateStore, StateStoreExt, StoreKey};

use crate::catalog::CatalogService;
use crate::error::Result;

/// Cart operations for an acting scope.
///
/// The cart is loaded fresh on every call and written back only when the
/// mutation actually changed it, so no-op requests leave the store alone.
#[derive(Debug, Clone)]
pub struct CartService<S> {
    store: S,
    catalog: CatalogService<S>,
}

impl<S: StateStore + Clone> CartService<S> {
    /// Creates a cart service over the given store.
    pub fn new(store: S) -> Self {
        let catalog = CatalogService::new(store.clone());
        Self { store, catalog }
    }

    async fn load(&self, scope: &Scope) -> Result<Cart> {
        Ok(self
            .store
            .get_json(&StoreKey::cart(scope.clone()))
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, scope: &Scope, cart: &Cart) -> Result<()> {
        self.store
            .put_json(&StoreKey::cart(scope.clone()), cart)
            .await?;
        metrics::counter!("cart_mutations_total").increment(1);
        Ok(())
    }

    /// Returns the scope's current cart.
    pub async fn view(&self, scope: &Scope) -> Result<Cart> {
        self.load(scope).await
    }

    /// Adds a medicine to the scope's cart, snapshotting its current price.
    ///
    /// The quantity defaults to one full strip; re-adding increments the
    /// existing line and keeps its original snapshot.
    #[tracing::instrument(skip(self), fields(scope = %scope, medicine_id = %medicine_id))]
    pub async fn add(
        &self,
        scope: &Scope,
        medicine_id: &MedicineId,
        quantity: Option<u32>,
    ) -> Result<Cart> {
        let medicine = self.catalog.get(medicine_id).await?;
        let mut cart = self.load(scope).await?;
        cart.add(&medicine, quantity)?;
        self.save(scope, &cart).await?;
        Ok(cart)
    }

    /// Sets the quantity of an existing line.
    ///
    /// Quantities below 1 are ignored without touching the store.
    #[tracing::instrument(skip(self), fields(scope = %scope, medicine_id = %medicine_id))]
    pub async fn update_quantity(
        &self,
        scope: &Scope,
        medicine_id: &MedicineId,
        quantity: u32,
    ) -> Result<Cart> {
        let mut cart = self.load(scope).await?;
        if cart.update_quantity(medicine_id, quantity)? {
            self.save(scope, &cart).await?;
        }
        Ok(cart)
    }

    /// Removes a line. Idempotent: removing an absent line is a no-op.
    #[tracing::instrument(skip(self), fields(scope = %scope, medicine_id = %medicine_id))]
    pub async fn remove(&self, scope: &Scope, medicine_id: &MedicineId) -> Result<Cart> {
        let mut cart = self.load(scope).await?;
        if cart.remove(medicine_id) {
            self.save(scope, &cart).await?;
        }
        Ok(cart)
    }

    /// Empties the scope's cart.
    #[tracing::instrument(skip(self), fields(scope = %scope))]
    pub async fn clear(&self, scope: &Scope) -> Result<Cart> {
        let mut cart = self.load(scope).await?;
        if cart.clear() {
            self.save(scope, &cart).await?;
        }
        Ok(cart)
    }
}
