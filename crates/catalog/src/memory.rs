use async_trait::async_trait;
use tokio::sync::RwLock;

use shopfront_core::domain::product::Product;

use crate::{CatalogStore, StoreError};

/// In-memory catalog, ordered like the file it stands in for. Used by tests
/// and by anything that wants a catalog without touching disk.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalogStore {
    pub fn seeded(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.clone())
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let mut stored = self.products.write().await;
        *stored = products.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use shopfront_core::domain::product::{Product, ProductId};

    use super::InMemoryCatalogStore;
    use crate::CatalogStore;

    #[tokio::test]
    async fn seeded_store_serves_and_overwrites() {
        let store = InMemoryCatalogStore::seeded(vec![Product::new(
            "p1",
            "Desk Lamp",
            Decimal::new(2450, 2),
            10,
        )]);

        let mut products = store.load_all().await.expect("load should succeed");
        products[0].stock = 7;
        store.save_all(&products).await.expect("save should succeed");

        let found = store
            .find_by_id(&ProductId::from("p1"))
            .await
            .expect("load should succeed")
            .expect("product should exist");
        assert_eq!(found.stock, 7);
    }
}
