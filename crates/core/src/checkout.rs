//! Pure checkout logic: the read-only validation pass over an aggregated
//! cart and the stock decrement that follows a clean validation. Storage
//! access stays out of this module; the server wires the two around a
//! `CatalogStore`.

use crate::domain::cart::AggregatedCart;
use crate::domain::product::Product;
use crate::errors::LineFailure;

/// Checks every aggregated line against current stock and collects all
/// failures before deciding anything. Never short-circuits and never mutates.
pub fn validate(cart: &AggregatedCart, products: &[Product]) -> Vec<LineFailure> {
    let mut failures = Vec::new();

    for (id, &requested) in cart {
        match products.iter().find(|product| &product.id == id) {
            None => failures.push(LineFailure::not_found(id.clone())),
            Some(product) if u64::from(product.stock) < requested => {
                failures.push(LineFailure::insufficient(id.clone(), product.stock, requested));
            }
            Some(_) => {}
        }
    }

    failures
}

/// Decrements stock for every aggregated line. Saturates at zero: validation
/// already guarantees `stock >= requested`, so the floor only matters when a
/// concurrent checkout committed between our load and this apply.
pub fn apply(cart: &AggregatedCart, products: &mut [Product]) {
    for (id, &requested) in cart {
        if let Some(product) = products.iter_mut().find(|product| &product.id == id) {
            let requested = u32::try_from(requested).unwrap_or(u32::MAX);
            product.stock = product.stock.saturating_sub(requested);
        }
    }
}
