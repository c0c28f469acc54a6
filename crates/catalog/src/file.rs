use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use shopfront_core::domain::product::Product;

use crate::{CatalogStore, StoreError};

/// Flat-file catalog: a single JSON array of product objects, read fresh per
/// call and rewritten wholesale on save. A crash mid-write can truncate the
/// file; that window is documented behavior, not handled here.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Unavailable { path: self.path.clone(), source })?;

        serde_json::from_str(&raw)
            .map_err(|source| StoreError::Malformed { path: self.path.clone(), source })
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(products)
            .map_err(|source| StoreError::Malformed { path: self.path.clone(), source })?;

        fs::write(&self.path, raw)
            .await
            .map_err(|source| StoreError::Unavailable { path: self.path.clone(), source })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use shopfront_core::domain::product::{Product, ProductId};

    use super::JsonFileStore;
    use crate::{CatalogStore, StoreError};

    fn sample() -> Vec<Product> {
        vec![
            Product::new("p1", "Desk Lamp", Decimal::new(2450, 2), 10),
            Product::new("p2", "Notebook", Decimal::new(399, 2), 2),
        ]
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        let result = store.load_all().await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn malformed_file_is_malformed() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not a product array").expect("fixture should write");

        let result = JsonFileStore::new(path).load_all().await;
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_content() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("products.json"));

        store.save_all(&sample()).await.expect("save should succeed");
        let loaded = store.load_all().await.expect("load should succeed");

        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn load_all_reads_fresh_on_every_call() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("products.json");
        let store = JsonFileStore::new(&path);

        store.save_all(&sample()).await.expect("save should succeed");
        let first = store.load_all().await.expect("load should succeed");
        assert_eq!(first.len(), 2);

        // An external writer replaces the file; the next load must see it.
        std::fs::write(&path, r#"[{"id":"p9","name":"Mug","price":8.0,"stock":1}]"#)
            .expect("external rewrite should succeed");

        let second = store.load_all().await.expect("load should succeed");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, ProductId::from("p9"));
    }

    #[tokio::test]
    async fn find_by_id_returns_first_match_among_duplicates() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[
                {"id":"p1","name":"First","price":1.0,"stock":1},
                {"id":"p1","name":"Second","price":2.0,"stock":2}
            ]"#,
        )
        .expect("fixture should write");

        let store = JsonFileStore::new(path);
        let found = store
            .find_by_id(&ProductId::from("p1"))
            .await
            .expect("load should succeed")
            .expect("product should exist");

        assert_eq!(found.name, "First");
    }

    #[tokio::test]
    async fn find_by_id_misses_cleanly() {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("products.json"));
        store.save_all(&sample()).await.expect("save should succeed");

        let found = store.find_by_id(&ProductId::from("ghost")).await.expect("load should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn display_fields_survive_a_rewrite_cycle() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"id":"p1","name":"Desk Lamp","price":24.5,"stock":3,"image":"/img/lamp.png"}]"#,
        )
        .expect("fixture should write");

        let store = JsonFileStore::new(path);
        let products = store.load_all().await.expect("load should succeed");
        store.save_all(&products).await.expect("save should succeed");

        let reloaded = store.load_all().await.expect("reload should succeed");
        assert_eq!(
            reloaded[0].extra.get("image").and_then(|v| v.as_str()),
            Some("/img/lamp.png")
        );
    }
}
