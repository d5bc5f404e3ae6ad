use std::sync::{Mutex, MutexGuard};

use stockroom_core::{DomainError, DomainResult};
use stockroom_products::{Product, ProductDraft, ProductId, ProductPatch};

/// Catalog storage abstraction used by the HTTP layer.
///
/// Lookups are by identifier only; not-found is a normal outcome and never
/// aborts anything.
pub trait CatalogStore: Send + Sync {
    fn find(&self, id: ProductId) -> Option<Product>;
    fn insert(&self, draft: ProductDraft) -> DomainResult<Product>;
    fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product>;
    fn delete(&self, id: ProductId) -> DomainResult<()>;
    fn list(&self) -> Vec<Product>;
}

impl<S> CatalogStore for std::sync::Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn find(&self, id: ProductId) -> Option<Product> {
        (**self).find(id)
    }

    fn insert(&self, draft: ProductDraft) -> DomainResult<Product> {
        (**self).insert(draft)
    }

    fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: ProductId) -> DomainResult<()> {
        (**self).delete(id)
    }

    fn list(&self) -> Vec<Product> {
        (**self).list()
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    /// Insertion-ordered; ordering carries no meaning, lookups always scan by id.
    items: Vec<Product>,
    /// High-water mark for assigned ids; never decreases, so ids are never reused.
    next_id: u64,
}

/// In-memory catalog: one exclusive lock around the collection and the
/// identifier counter. Every operation, reads included, takes the lock for
/// the scan/mutate critical section only.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog pre-populated with fixed records. The counter resumes
    /// past the highest seeded id.
    pub fn with_products(items: Vec<Product>) -> Self {
        let next_id = items.iter().map(|p| p.id.get()).max().unwrap_or(0);
        Self {
            inner: Mutex::new(CatalogState { items, next_id }),
        }
    }

    fn locked(&self) -> MutexGuard<'_, CatalogState> {
        // A poisoned lock only means a holder panicked; the collection itself
        // is never left torn mid-operation.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CatalogStore for InMemoryCatalog {
    fn find(&self, id: ProductId) -> Option<Product> {
        let state = self.locked();
        state.items.iter().find(|p| p.id == id).cloned()
    }

    fn insert(&self, draft: ProductDraft) -> DomainResult<Product> {
        draft.validate()?;

        let mut state = self.locked();
        state.next_id += 1;
        let product = draft.into_product(ProductId::new(state.next_id));
        state.items.push(product.clone());
        Ok(product)
    }

    fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        patch.validate()?;

        let mut state = self.locked();
        let product = state
            .items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;
        patch.apply_to(product);
        Ok(product.clone())
    }

    fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut state = self.locked();
        let index = state
            .items
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;
        state.items.remove(index);
        Ok(())
    }

    fn list(&self) -> Vec<Product> {
        let state = self.locked();
        state.items.clone()
    }
}
