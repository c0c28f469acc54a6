pub mod checkout;
pub mod config;
pub mod domain;
pub mod errors;

pub use domain::cart::{AggregatedCart, CartLine};
pub use domain::product::{Product, ProductId};
pub use errors::{CheckoutError, LineFailure, LineFailureReason};
