use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::product::ProductId;

/// A single requested line as the client is supposed to send it. Raw payload
/// lines that do not deserialize into this shape are dropped, not rejected.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub qty: u64,
}

/// Product id to total requested quantity, summed across duplicate lines.
/// Insertion-ordered so validation reports failures in the order ids first
/// appear in the cart.
pub type AggregatedCart = IndexMap<ProductId, u64>;

/// The `items` field of a checkout payload as a sequence. Anything that is
/// not a sequence counts as an empty cart.
pub fn extract_lines(payload: &Value) -> &[Value] {
    payload
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Builds the aggregated cart from raw lines. A line is dropped silently when
/// it does not parse as a `CartLine` (wrong shape, negative, fractional or
/// non-numeric qty), when its id is empty, or when its qty is zero.
pub fn aggregate(lines: &[Value]) -> AggregatedCart {
    let mut cart = AggregatedCart::new();

    for line in lines {
        let Ok(line) = serde_json::from_value::<CartLine>(line.clone()) else {
            continue;
        };
        if line.id.is_empty() || line.qty == 0 {
            continue;
        }
        let total = cart.entry(ProductId(line.id)).or_insert(0);
        // Saturate rather than wrap: a wrapped total could sneak past stock
        // validation, while a saturated one fails it honestly.
        *total = total.saturating_add(line.qty);
    }

    cart
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{aggregate, extract_lines};
    use crate::domain::product::ProductId;

    #[test]
    fn non_sequence_payload_extracts_no_lines() {
        assert!(extract_lines(&json!({})).is_empty());
        assert!(extract_lines(&json!({"items": "p1"})).is_empty());
        assert!(extract_lines(&json!({"items": {"id": "p1"}})).is_empty());
        assert!(extract_lines(&json!(null)).is_empty());
    }

    #[test]
    fn duplicate_ids_sum_into_one_entry() {
        let lines = [json!({"id": "p1", "qty": 2}), json!({"id": "p1", "qty": 3})];
        let cart = aggregate(&lines);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::from("p1")), Some(&5));
    }

    #[test]
    fn invalid_lines_are_dropped_silently() {
        let lines = [
            json!({"id": "", "qty": 1}),
            json!({"id": "p1", "qty": 0}),
            json!({"id": "p2", "qty": -4}),
            json!({"id": "p3", "qty": 1.5}),
            json!({"id": "p4"}),
            json!({"qty": 2}),
            json!("not a line"),
            json!({"id": "p5", "qty": "2"}),
        ];

        assert!(aggregate(&lines).is_empty());
    }

    #[test]
    fn duplicate_quantities_saturate_instead_of_wrapping() {
        let lines = [
            json!({"id": "p1", "qty": u64::MAX}),
            json!({"id": "p1", "qty": 1}),
            json!({"id": "p1", "qty": 7}),
        ];
        let cart = aggregate(&lines);

        assert_eq!(cart.get(&ProductId::from("p1")), Some(&u64::MAX));
    }

    #[test]
    fn valid_lines_survive_surrounding_garbage() {
        let lines = [
            json!({"id": "p2", "qty": 1}),
            json!({"id": "", "qty": 9}),
            json!({"id": "p1", "qty": 4, "note": "extra fields are fine"}),
            json!({"id": "p2", "qty": 2}),
        ];
        let cart = aggregate(&lines);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(&ProductId::from("p2")), Some(&3));
        assert_eq!(cart.get(&ProductId::from("p1")), Some(&4));
        // First occurrence fixes the ordering.
        assert_eq!(cart.first().map(|(id, _)| id.0.as_str()), Some("p2"));
    }
}
