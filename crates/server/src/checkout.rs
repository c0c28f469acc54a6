//! The checkout processor: extract, aggregate, load, validate, commit,
//! persist. Either the whole cart commits or nothing is written.

use serde_json::Value;

use shopfront_catalog::{CatalogStore, StoreError};
use shopfront_core::checkout::{apply, validate};
use shopfront_core::domain::cart::{aggregate, extract_lines};
use shopfront_core::errors::CheckoutError;

#[derive(Debug)]
pub enum CheckoutFailure {
    /// Client-side rejection; the store was either never touched or only read.
    Cart(CheckoutError),
    /// Catalog load or persist failure, propagated unchanged.
    Store(StoreError),
}

impl From<CheckoutError> for CheckoutFailure {
    fn from(value: CheckoutError) -> Self {
        Self::Cart(value)
    }
}

impl From<StoreError> for CheckoutFailure {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Runs one checkout against the store. Validation sees a single snapshot of
/// the catalog; a concurrent checkout between our load and save can still
/// win the write (documented lost-update window, no mitigation here).
///
/// If `save_all` fails after the in-memory decrement the caller gets the
/// store error even though the file may have been partially written; there
/// is no way to know from here.
pub async fn process(store: &dyn CatalogStore, payload: &Value) -> Result<(), CheckoutFailure> {
    let lines = extract_lines(payload);
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    let cart = aggregate(lines);
    if cart.is_empty() {
        return Err(CheckoutError::InvalidCart.into());
    }

    let mut products = store.load_all().await?;

    let failures = validate(&cart, &products);
    if !failures.is_empty() {
        return Err(CheckoutError::Rejected(failures).into());
    }

    apply(&cart, &mut products);
    store.save_all(&products).await?;

    Ok(())
}
