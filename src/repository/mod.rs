use rust_decimal::Decimal;

use crate::db::{DbConnection, DbPool};
use crate::domain::product::{Category, Product};
use crate::domain::types::ProductId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod product;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between callers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List every persisted product in identifier order.
    fn all(&self) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product by its identifier.
    fn find(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// List products whose name equals `name`.
    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Product>>;
    /// List products with the given availability flag.
    fn find_by_availability(&self, available: bool) -> RepositoryResult<Vec<Product>>;
    /// List products in the given category.
    fn find_by_category(&self, category: Category) -> RepositoryResult<Vec<Product>>;
    /// List products whose price equals `price`, regardless of scale.
    fn find_by_price(&self, price: Decimal) -> RepositoryResult<Vec<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Insert the product and assign the generated identifier to it.
    fn create(&self, product: &mut Product) -> RepositoryResult<()>;
    /// Persist the product's current state over its stored record.
    fn update(&self, product: &Product) -> RepositoryResult<usize>;
    /// Delete a product by its identifier.
    fn delete(&self, id: ProductId) -> RepositoryResult<usize>;
}
