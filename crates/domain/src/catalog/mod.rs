//! Medicine catalog: entities and the built-in seed list.

mod medicine;
mod seed;

pub use medicine::{Category, Medicine, MedicineId};
pub use seed::seed_medicines;
