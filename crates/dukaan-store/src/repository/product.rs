//! # Product Repository
//!
//! Read-modify-write operations on the product collection.
//!
//! ## Id Assignment
//! Ids are `max(existing ids) + 1`, scanned over the whole file on every
//! insert. That is only correct because the insert holds the products lock
//! for the entire read-assign-write cycle.

use tracing::debug;

use dukaan_core::ids::next_id;
use dukaan_core::ops::find_product_by_id;
use dukaan_core::{Product, ProductDraft};

use crate::collection::Collection;
use crate::error::StoreResult;
use crate::store::Store;

/// Repository for product operations.
#[derive(Clone)]
pub struct ProductRepository {
    store: Store,
}

impl ProductRepository {
    pub(crate) fn new(store: Store) -> Self {
        ProductRepository { store }
    }

    /// Lists the whole product collection.
    pub async fn list(&self) -> Vec<Product> {
        self.store.read(Collection::Products).await
    }

    /// Looks up one product by id.
    pub async fn get(&self, id: u64) -> Option<Product> {
        let products = self.list().await;
        find_product_by_id(&products, id).cloned()
    }

    /// Inserts a new product: assigns the next id and substitutes a
    /// placeholder image when none was given.
    pub async fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        let _guard = self.store.lock(Collection::Products).await;
        let mut products: Vec<Product> = self.store.read(Collection::Products).await;

        let product = Product {
            id: next_id(products.iter().map(|p| p.id)),
            image: draft.image_or_placeholder(),
            name: draft.name,
            price: draft.price,
        };

        products.push(product.clone());
        self.store.write(Collection::Products, &products).await?;

        debug!(id = product.id, name = %product.name, "product inserted");
        Ok(product)
    }

    /// Updates an existing product. A blank submitted image keeps the image
    /// already on the record. Returns `None` (file untouched) when the id
    /// has no match.
    pub async fn update(&self, id: u64, draft: ProductDraft) -> StoreResult<Option<Product>> {
        let _guard = self.store.lock(Collection::Products).await;
        let mut products: Vec<Product> = self.store.read(Collection::Products).await;

        let Some(existing) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        let image = draft.image_or_keep(&existing.image);
        existing.image = image;
        existing.name = draft.name;
        existing.price = draft.price;
        let updated = existing.clone();

        self.store.write(Collection::Products, &products).await?;

        debug!(id, "product updated");
        Ok(Some(updated))
    }

    /// Deletes a product by id. Returns false (file untouched) when the id
    /// has no match.
    pub async fn delete(&self, id: u64) -> StoreResult<bool> {
        let _guard = self.store.lock(Collection::Products).await;
        let mut products: Vec<Product> = self.store.read(Collection::Products).await;

        let Some(index) = products.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        products.remove(index);
        self.store.write(Collection::Products, &products).await?;

        debug!(id, "product deleted");
        Ok(true)
    }
}

// =============================================================================
// Tests
// =============================================================================
