//! Catalog service: seeding, browsing and back-office CRUD.

use domain::{Category, DomainError, Medicine, MedicineId, seed_medicines};
use store::{StateStore, StateStoreExt, StoreKey};

use crate::error::Result;

/// Filters applied by the catalog listing.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub query: Option<String>,
}

impl CatalogFilter {
    fn matches(&self, medicine: &Medicine) -> bool {
        self.category.is_none_or(|c| medicine.category == c)
            && self
                .query
                .as_deref()
                .is_none_or(|q| medicine.matches_query(q))
    }
}

/// Read and admin operations over the medicine catalog.
///
/// The whole catalog lives under one store key and is rewritten on every
/// admin mutation; listing order is insertion order.
#[derive(Debug, Clone)]
pub struct CatalogService<S> {
    store: S,
}

impl<S: StateStore> CatalogService<S> {
    /// Creates a catalog service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<Vec<Medicine>> {
        Ok(self
            .store
            .get_json(&StoreKey::Catalog)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, catalog: Vec<Medicine>) -> Result<()> {
        Ok(self.store.put_json(&StoreKey::Catalog, &catalog).await?)
    }

    /// Writes the built-in seed list if the catalog key is absent.
    ///
    /// Returns the catalog size afterwards. An already-populated (or
    /// deliberately emptied) catalog is left untouched.
    #[tracing::instrument(skip(self))]
    pub async fn ensure_seeded(&self) -> Result<usize> {
        if let Some(existing) = self
            .store
            .get_json::<Vec<Medicine>>(&StoreKey::Catalog)
            .await?
        {
            return Ok(existing.len());
        }

        let seed = seed_medicines();
        let count = seed.len();
        self.save(seed).await?;
        tracing::info!(count, "seeded medicine catalog");
        Ok(count)
    }

    /// Lists medicines matching the filter, in catalog order.
    pub async fn list(&self, filter: &CatalogFilter) -> Result<Vec<Medicine>> {
        let catalog = self.load().await?;
        Ok(catalog.into_iter().filter(|m| filter.matches(m)).collect())
    }

    /// Fetches a single medicine by id.
    pub async fn get(&self, medicine_id: &MedicineId) -> Result<Medicine> {
        let catalog = self.load().await?;
        catalog
            .into_iter()
            .find(|m| &m.id == medicine_id)
            .ok_or_else(|| {
                DomainError::MedicineNotFound {
                    medicine_id: medicine_id.clone(),
                }
                .into()
            })
    }

    /// Adds a new medicine to the catalog.
    #[tracing::instrument(skip(self, medicine), fields(medicine_id = %medicine.id))]
    pub async fn create(&self, medicine: Medicine) -> Result<Medicine> {
        medicine.validate()?;
        let mut catalog = self.load().await?;

        if catalog.iter().any(|m| m.id == medicine.id) {
            return Err(DomainError::MedicineAlreadyExists {
                medicine_id: medicine.id.clone(),
            }
            .into());
        }

        catalog.push(medicine.clone());
        self.save(catalog).await?;
        tracing::info!(medicine_id = %medicine.id, "medicine created");
        Ok(medicine)
    }

    /// Replaces an existing medicine, matched by its id.
    #[tracing::instrument(skip(self, medicine), fields(medicine_id = %medicine.id))]
    pub async fn update(&self, medicine: Medicine) -> Result<Medicine> {
        medicine.validate()?;
        let mut catalog = self.load().await?;

        let slot = catalog
            .iter_mut()
            .find(|m| m.id == medicine.id)
            .ok_or_else(|| DomainError::MedicineNotFound {
                medicine_id: medicine.id.clone(),
            })?;

        *slot = medicine.clone();
        self.save(catalog).await?;
        tracing::info!(medicine_id = %medicine.id, "medicine updated");
        Ok(medicine)
    }

    /// Removes a medicine from the catalog.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, medicine_id: &MedicineId) -> Result<()> {
        let mut catalog = self.load().await?;
        let before = catalog.len();
        catalog.retain(|m| &m.id != medicine_id);

        if catalog.len() == before {
            return Err(DomainError::MedicineNotFound {
                medicine_id: medicine_id.clone(),
            }
            .into());
        }

        self.save(catalog).await?;
        tracing::info!(medicine_id = %medicine_id, "medicine deleted");
        Ok(())
    }
}
