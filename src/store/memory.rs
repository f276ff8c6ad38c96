use std::cell::{Cell, RefCell};

use tracing::trace;

use crate::core::{Product, ProductDraft, ProductId};

use super::{EntityStore, StoreError, StoreResult};

/// Single-threaded store kept in memory.
///
/// Ids are assigned sequentially starting at `1`; deleted ids are never reused.
#[derive(Debug)]
pub struct InMemoryEntityStore {
    products: RefCell<Vec<Product>>,
    next_id: Cell<u64>,
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Seeds the store with existing products, keeping their ids.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products
            .iter()
            .filter_map(|product| product.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            products: RefCell::new(products),
            next_id: Cell::new(next_id),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.borrow().is_empty()
    }

    fn allocate_id(&self) -> ProductId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ProductId::new(id.to_string())
    }
}

impl EntityStore for InMemoryEntityStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.borrow().clone())
    }

    async fn get(&self, id: &ProductId) -> StoreResult<Product> {
        self.products
            .borrow()
            .iter()
            .find(|product| &product.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    async fn create(&self, draft: &ProductDraft) -> StoreResult<Product> {
        let product = draft.clone().with_id(self.allocate_id());
        trace!(product = %product.id, "product created");
        self.products.borrow_mut().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<()> {
        let mut products = self.products.borrow_mut();
        let product = products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        product.label = draft.label.clone();
        product.x = draft.x;
        product.y = draft.y;
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> StoreResult<()> {
        let mut products = self.products.borrow_mut();
        let before = products.len();
        products.retain(|product| &product.id != id);
        if products.len() == before {
            return Err(StoreError::NotFound { id: id.clone() });
        }
        trace!(product = %id, "product deleted");
        Ok(())
    }
}
