//! Shopping cart: ordered line items with add-time price snapshots.

use serde::{Deserialize, Serialize};

use crate::catalog::{Medicine, MedicineId};
use crate::error::DomainError;
use crate::money::Money;
use crate::pricing::{self, PriceQuote};

/// One cart line: a medicine price snapshot plus a quantity in tablets.
///
/// The snapshot fields are captured when the medicine is first added and
/// are never refreshed from the catalog, so the checkout summary always
/// matches what the customer saw at add time, even if the catalog price
/// changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub medicine_id: MedicineId,
    pub name: String,
    pub generic_price: Money,
    pub strip_size: u32,
    pub quantity: u32,
}

impl CartLine {
    /// Captures a snapshot of `medicine` with the given quantity.
    pub fn snapshot_of(medicine: &Medicine, quantity: u32) -> Self {
        Self {
            medicine_id: medicine.id.clone(),
            name: medicine.name.clone(),
            generic_price: medicine.generic_price,
            strip_size: medicine.strip_size,
            quantity,
        }
    }

    /// Computes the quote for this line from its snapshot.
    pub fn quote(&self) -> PriceQuote {
        pricing::quote(self.generic_price, self.strip_size, self.quantity)
    }
}

/// Derived cart figures, recomputed on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line final totals (post-discount).
    pub cart_total: Money,

    /// Sum of line discount amounts.
    pub total_discount: Money,

    /// Total units across all lines (tablets, not distinct products).
    /// Wider than a line quantity so the sum over lines cannot overflow.
    pub item_count: u64,
}

/// Ordered collection of cart lines, unique by medicine id.
///
/// Serializes transparently as the line array, which is the shape the
/// state store persists per scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns true if the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Adds `quantity` units of `medicine`, defaulting to one full strip.
    ///
    /// Re-adding a medicine already in the cart increments its quantity
    /// and keeps the original price snapshot. An explicit zero quantity
    /// is rejected, and so is an increment that would overflow the line
    /// quantity.
    pub fn add(&mut self, medicine: &Medicine, quantity: Option<u32>) -> Result<(), DomainError> {
        let quantity = quantity.unwrap_or(medicine.strip_size);
        if quantity < 1 {
            return Err(DomainError::InvalidQuantity { quantity });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.medicine_id == medicine.id)
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(DomainError::InvalidQuantity { quantity })?;
        } else {
            self.lines.push(CartLine::snapshot_of(medicine, quantity));
        }
        Ok(())
    }

    /// Removes the line for `medicine_id`.
    ///
    /// Idempotent: returns false (and changes nothing) when no such line
    /// exists.
    pub fn remove(&mut self, medicine_id: &MedicineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.medicine_id != medicine_id);
        self.lines.len() != before
    }

    /// Replaces the quantity of the line for `medicine_id`.
    ///
    /// A quantity below 1 is a silent guard: the cart is left unchanged
    /// and `Ok(false)` is returned so callers skip the persist. An
    /// unknown id is a not-found error.
    pub fn update_quantity(
        &mut self,
        medicine_id: &MedicineId,
        quantity: u32,
    ) -> Result<bool, DomainError> {
        if quantity < 1 {
            return Ok(false);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| &line.medicine_id == medicine_id)
            .ok_or_else(|| DomainError::LineNotFound {
                medicine_id: medicine_id.clone(),
            })?;

        line.quantity = quantity;
        Ok(true)
    }

    /// Empties the cart. Returns false when it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.lines.clear();
        true
    }

    /// Recomputes the derived totals across all lines.
    pub fn totals(&self) -> CartTotals {
        let mut cart_total = Money::zero();
        let mut total_discount = Money::zero();
        let mut item_count = 0u64;

        for line in &self.lines {
            let quote = line.quote();
            cart_total += quote.final_total;
            total_discount += quote.discount_amount;
            item_count += u64::from(line.quantity);
        }

        CartTotals {
            cart_total,
            total_discount,
            item_count,
        }
    }
}
