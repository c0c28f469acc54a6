use serde::Serialize;
use thiserror::Error;

use crate::domain::product::ProductId;

/// Why a single aggregated cart line failed validation. Serializes into the
/// wire shape `{reason, stock?, requested?}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum LineFailureReason {
    ProductNotFound,
    InsufficientStock { stock: u32, requested: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineFailure {
    pub id: ProductId,
    #[serde(flatten)]
    pub reason: LineFailureReason,
}

impl LineFailure {
    pub fn not_found(id: ProductId) -> Self {
        Self { id, reason: LineFailureReason::ProductNotFound }
    }

    pub fn insufficient(id: ProductId, stock: u32, requested: u64) -> Self {
        Self { id, reason: LineFailureReason::InsufficientStock { stock, requested } }
    }
}

/// Client-side checkout failures. Store failures are not part of this enum;
/// they belong to the storage layer and propagate unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("cart contains no valid lines")]
    InvalidCart,
    #[error("checkout rejected: {} line(s) failed validation", .0.len())]
    Rejected(Vec<LineFailure>),
}
