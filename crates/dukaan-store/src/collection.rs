//! # Collections
//!
//! The store manages exactly three collections, one JSON array file each.
//! File names are a data-compatibility contract - existing deployments have
//! these files on disk (including the singular `user.json`).

use std::fmt;

/// The persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Products,
    Users,
    Transactions,
}

impl Collection {
    /// All collections, in lock-index order.
    pub const ALL: [Collection; 3] = [
        Collection::Products,
        Collection::Users,
        Collection::Transactions,
    ];

    /// Backing file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Products => "products.json",
            // Singular by historical accident; kept for compatibility with
            // existing data directories.
            Collection::Users => "user.json",
            Collection::Transactions => "transactions.json",
        }
    }

    /// Index into the store's per-collection lock array.
    pub(crate) fn lock_index(self) -> usize {
        match self {
            Collection::Products => 0,
            Collection::Users => 1,
            Collection::Transactions => 2,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Products => write!(f, "products"),
            Collection::Users => write!(f, "users"),
            Collection::Transactions => write!(f, "transactions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(Collection::Products.file_name(), "products.json");
        assert_eq!(Collection::Users.file_name(), "user.json");
        assert_eq!(Collection::Transactions.file_name(), "transactions.json");
    }

    #[test]
    fn test_lock_indices_are_distinct() {
        let mut seen = [false; 3];
        for c in Collection::ALL {
            assert!(!seen[c.lock_index()]);
            seen[c.lock_index()] = true;
        }
    }
}
