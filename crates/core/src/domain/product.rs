use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A catalog record. `stock` is the only field this system ever mutates;
/// everything the frontend renders beyond the typed fields (description,
/// image, category, ...) is carried in `extra` so a read-modify-write cycle
/// preserves it byte-for-byte in meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: ProductId(id.into()),
            name: name.into(),
            price,
            stock,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Product;

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let raw = r#"{
            "id": "p1",
            "name": "Desk Lamp",
            "price": 24.5,
            "stock": 3,
            "image": "/img/lamp.png",
            "category": "lighting"
        }"#;

        let product: Product = serde_json::from_str(raw).expect("product should parse");
        assert_eq!(product.id.0, "p1");
        assert_eq!(product.stock, 3);
        assert_eq!(product.extra.get("image").and_then(|v| v.as_str()), Some("/img/lamp.png"));

        let back = serde_json::to_value(&product).expect("product should serialize");
        assert_eq!(back.get("category").and_then(|v| v.as_str()), Some("lighting"));
    }

    #[test]
    fn price_serializes_as_a_json_number() {
        let product = Product::new("p1", "Desk Lamp", Decimal::new(2450, 2), 3);
        let value = serde_json::to_value(&product).expect("product should serialize");
        assert!(value.get("price").map(|v| v.is_number()).unwrap_or(false));
    }
}
