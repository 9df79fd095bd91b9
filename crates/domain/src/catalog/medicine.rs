//! Catalog entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::money::Money;

/// Medicine identifier (stable catalog id, e.g. `MED-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(String);

impl MedicineId {
    /// Creates a new medicine ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the medicine ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MedicineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MedicineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for MedicineId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Catalog category (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PainRelief,
    Antibiotics,
    Diabetes,
    Cardiac,
    Allergy,
    Gastro,
}

impl Category {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PainRelief => "pain_relief",
            Category::Antibiotics => "antibiotics",
            Category::Diabetes => "diabetes",
            Category::Cardiac => "cardiac",
            Category::Allergy => "allergy",
            Category::Gastro => "gastro",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A medicine record in the catalog.
///
/// Prices are per strip; `strip_size` is the number of tablets in one
/// strip. `branded_price >= generic_price` is expected but not enforced,
/// so the derived savings can be negative when the catalog data violates
/// the expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub brand_example: String,
    pub salt: String,
    pub category: Category,
    pub uses: Vec<String>,
    pub description: String,
    pub generic_price: Money,
    pub branded_price: Money,
    pub strip_size: u32,
    pub expiry_date: NaiveDate,
    pub dosage: String,
    pub side_effects: Vec<String>,
    pub image_ref: String,
}

impl Medicine {
    /// Validates the catalog invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::InvalidMedicine { field: "id" });
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidMedicine { field: "name" });
        }
        if self.salt.trim().is_empty() {
            return Err(DomainError::InvalidMedicine { field: "salt" });
        }
        if self.strip_size < 1 {
            return Err(DomainError::InvalidMedicine { field: "strip_size" });
        }
        if self.generic_price.is_negative() {
            return Err(DomainError::InvalidMedicine {
                field: "generic_price",
            });
        }
        Ok(())
    }

    /// Absolute savings per strip versus the branded equivalent.
    ///
    /// Signed and never clamped: negative when the branded price is below
    /// the generic price.
    pub fn savings(&self) -> Money {
        self.branded_price - self.generic_price
    }

    /// Savings as a rounded percentage of the branded price.
    ///
    /// Returns 0 when the branded price is not positive.
    pub fn savings_percent(&self) -> i64 {
        if !self.branded_price.is_positive() {
            return 0;
        }
        let savings = self.savings().paise() as i128;
        let branded = self.branded_price.paise() as i128;
        ((2 * savings * 100 + branded) / (2 * branded)) as i64
    }

    /// Case-insensitive text match over name, brand, salt and use tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.brand_example.to_lowercase().contains(&needle)
            || self.salt.to_lowercase().contains(&needle)
            || self.uses.iter().any(|u| u.to_lowercase().contains(&needle))
    }
}
