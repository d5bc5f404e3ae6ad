use std::sync::Arc;

use stockroom_core::DomainResult;
use stockroom_products::{Product, ProductDraft, ProductId, ProductPatch};
use stockroom_store::{CatalogStore, InMemoryCatalog};

/// Handler-facing facade over the catalog store.
///
/// Constructed once in `build_app` and injected into handlers via
/// `Extension`, so tests can stand up an isolated instance per server.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<InMemoryCatalog>,
}

impl AppServices {
    pub fn new(catalog: Arc<InMemoryCatalog>) -> Self {
        Self { catalog }
    }

    pub fn products_find(&self, id: ProductId) -> Option<Product> {
        self.catalog.find(id)
    }

    pub fn products_create(&self, draft: ProductDraft) -> DomainResult<Product> {
        self.catalog.insert(draft)
    }

    pub fn products_update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        self.catalog.update(id, patch)
    }

    pub fn products_delete(&self, id: ProductId) -> DomainResult<()> {
        self.catalog.delete(id)
    }

    pub fn products_list(&self) -> Vec<Product> {
        self.catalog.list()
    }
}

/// Wire up the services with the fixture catalog.
pub fn build_services() -> AppServices {
    AppServices::new(Arc::new(InMemoryCatalog::with_products(seed_products())))
}

/// Records present at startup; the id counter resumes after the highest one.
fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Cheese - St. Andre".to_string(),
            quantity: 60,
            code_value: "S73191A".to_string(),
            is_published: true,
            expiration: "12/04/2022".to_string(),
            price: 50.15,
        },
        Product {
            id: ProductId::new(2),
            name: "Apples".to_string(),
            quantity: 100,
            code_value: "A12345".to_string(),
            is_published: true,
            expiration: "25/12/2022".to_string(),
            price: 1.99,
        },
    ]
}
