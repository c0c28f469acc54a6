//! The Catalog Store: read and write access to the full product collection
//! as an ordered sequence. The flat JSON file is the production backend; the
//! in-memory store exists for tests and as proof the processor does not care
//! what sits behind the trait.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use shopfront_core::domain::product::{Product, ProductId};

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryCatalogStore;

/// Store failures surface to HTTP callers as a generic server error and are
/// never retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("catalog source `{path}` is unavailable: {source}")]
    Unavailable { path: PathBuf, source: std::io::Error },
    #[error("catalog source `{path}` is malformed: {source}")]
    Malformed { path: PathBuf, source: serde_json::Error },
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Reads the backing source fresh on every call. No caching layer sits
    /// between callers and the source.
    async fn load_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Serializes the full ordered sequence back, overwriting the source
    /// entirely. Not atomic and not locked; last write wins.
    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError>;

    /// Linear scan of `load_all`. If duplicate ids exist in storage the
    /// first match wins; the format assumes uniqueness but never enforces it.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.load_all().await?;
        Ok(products.into_iter().find(|product| &product.id == id))
    }
}
