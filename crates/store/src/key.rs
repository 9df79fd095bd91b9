use common::Scope;
use serde::{Deserialize, Serialize};

/// Key addressing one stored value in the state store.
///
/// Cart and bookmark entries are qualified by the owning scope, so a guest
/// and an authenticated user never read or overwrite each other's state.
/// The catalog, the order table, and the activity log are global.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKey {
    Cart(Scope),
    Bookmarks(Scope),
    Catalog,
    Orders,
    Activity,
}

impl StoreKey {
    pub fn cart(scope: Scope) -> Self {
        StoreKey::Cart(scope)
    }

    pub fn bookmarks(scope: Scope) -> Self {
        StoreKey::Bookmarks(scope)
    }

    /// Renders the stable storage key string.
    ///
    /// This string is the physical key in every backend, so its format is
    /// part of the persisted data contract.
    pub fn storage_key(&self) -> String {
        match self {
            StoreKey::Cart(scope) => format!("cart:{}", scope),
            StoreKey::Bookmarks(scope) => format!("bookmarks:{}", scope),
            StoreKey::Catalog => "catalog".to_string(),
            StoreKey::Orders => "orders".to_string(),
            StoreKey::Activity => "activity".to_string(),
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}
