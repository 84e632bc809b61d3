//! In-memory product store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::observability::metrics;
use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::product::{Product, ProductId, ProductPayload};

/// Products present at startup.
pub const SEED_PRODUCTS: [(i64, &str); 3] = [(1, "Laptop"), (2, "Phone"), (3, "Mouse")];

/// How the registry picks the id of a newly created product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdStrategy {
    /// Counter that only ever grows. Ids are never reused.
    #[default]
    Monotonic,
    /// Entry count + 1. Reuses ids after a deletion and can hand out an id
    /// that is still present. Kept for compatibility testing only.
    LengthDerived,
}

struct Entries {
    products: Vec<Product>,
    next_id: i64,
}

/// Ordered product list guarded by a mutex.
///
/// The lock is held for the whole of each operation and never across an
/// await point.
pub struct ProductRegistry {
    entries: Mutex<Entries>,
    strategy: IdStrategy,
}

impl ProductRegistry {
    /// Empty registry.
    pub fn new(strategy: IdStrategy) -> Self {
        Self::with_products(strategy, Vec::new())
    }

    /// Registry holding the three startup products.
    pub fn seeded(strategy: IdStrategy) -> Self {
        let products = SEED_PRODUCTS
            .iter()
            .map(|(id, name)| Product::new(*id, *name))
            .collect();
        Self::with_products(strategy, products)
    }

    /// Registry holding `products` in the given order.
    pub fn with_products(strategy: IdStrategy, products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        metrics::set_product_count(products.len());
        Self {
            entries: Mutex::new(Entries { products, next_id }),
            strategy,
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Number of products currently stored.
    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry with `id` is present. Not counted as an operation.
    pub fn contains(&self, id: ProductId) -> bool {
        self.lock().products.iter().any(|p| p.id == id)
    }

    /// Cloned view of the current sequence.
    pub fn snapshot(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// All products in insertion order.
    ///
    /// A non-empty `name_filter` (after trimming) is rejected with
    /// [`RegistryError::FilterDisabled`]; filtering is not switched on.
    pub fn list(&self, name_filter: Option<&str>) -> RegistryResult<Vec<Product>> {
        let filter = name_filter.map(str::trim).unwrap_or_default();
        let result = if filter.is_empty() {
            Ok(self.snapshot())
        } else {
            Err(RegistryError::FilterDisabled)
        };
        metrics::record_operation("list", &result);
        result
    }

    pub fn get(&self, id: ProductId) -> RegistryResult<Product> {
        let result = self
            .lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RegistryError::NotFound(id));
        metrics::record_operation("get", &result);
        result
    }

    /// Validate and append a new product.
    pub fn create(&self, payload: &ProductPayload) -> RegistryResult<Product> {
        let result = self.create_inner(payload);
        metrics::record_operation("create", &result);
        result
    }

    fn create_inner(&self, payload: &ProductPayload) -> RegistryResult<Product> {
        payload.validate()?;
        let name = payload.name().unwrap_or_default().to_string();

        let mut entries = self.lock();
        let id = match self.strategy {
            IdStrategy::Monotonic => entries.next_id,
            IdStrategy::LengthDerived => entries.products.len() as i64 + 1,
        };
        entries.next_id = entries.next_id.max(id) + 1;

        let product = Product::new(id, name);
        entries.products.push(product.clone());
        metrics::set_product_count(entries.products.len());

        tracing::debug!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replace the name of an existing product.
    ///
    /// The id is looked up before the payload is validated, so an unknown id
    /// reports [`RegistryError::NotFound`] even when the name is invalid.
    pub fn update(&self, id: ProductId, payload: &ProductPayload) -> RegistryResult<Product> {
        let result = self.update_inner(id, payload);
        metrics::record_operation("update", &result);
        result
    }

    fn update_inner(&self, id: ProductId, payload: &ProductPayload) -> RegistryResult<Product> {
        let mut entries = self.lock();
        let product = entries
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        payload.validate()?;
        product.name = payload.name().unwrap_or_default().to_string();

        tracing::debug!(id = %product.id, name = %product.name, "Product updated");
        Ok(product.clone())
    }

    /// Remove a product and return the remaining sequence.
    pub fn delete(&self, id: ProductId) -> RegistryResult<Vec<Product>> {
        let result = self.delete_inner(id);
        metrics::record_operation("delete", &result);
        result
    }

    fn delete_inner(&self, id: ProductId) -> RegistryResult<Vec<Product>> {
        let mut entries = self.lock();
        let index = entries
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(RegistryError::NotFound(id))?;

        let removed = entries.products.remove(index);
        metrics::set_product_count(entries.products.len());

        tracing::debug!(id = %removed.id, name = %removed.name, "Product deleted");
        Ok(entries.products.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // A panic mid-operation cannot leave the list half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProductRegistry {
    fn default() -> Self {
        Self::seeded(IdStrategy::default())
    }
}
