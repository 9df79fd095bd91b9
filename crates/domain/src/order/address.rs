//! Delivery address.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Address type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Home,
    Work,
}

/// Delivery address captured at checkout.
///
/// Immutable once attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub full_name: String,
    pub phone: String,
    pub line: String,
    pub city: String,
    pub pincode: String,
    pub kind: AddressKind,
}

impl Address {
    /// Validates the address fields.
    ///
    /// Phone must be a 10-digit mobile number and pincode a 6-digit
    /// postal code; the text fields must be non-blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.full_name.trim().is_empty() {
            return Err(DomainError::InvalidAddress { field: "full_name" });
        }
        if !is_digits(&self.phone, 10) {
            return Err(DomainError::InvalidAddress { field: "phone" });
        }
        if self.line.trim().is_empty() {
            return Err(DomainError::InvalidAddress { field: "line" });
        }
        if self.city.trim().is_empty() {
            return Err(DomainError::InvalidAddress { field: "city" });
        }
        if !is_digits(&self.pincode, 6) {
            return Err(DomainError::InvalidAddress { field: "pincode" });
        }
        Ok(())
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
