//! Service layer for the product collection.
//! - `product::validation` turns untyped payloads into typed input at the boundary.
//! - `product::repository` is the persistence gateway, with Postgres and JSON-file backends.
//! - `product::service` composes both and turns absence into `ServiceError::NotFound`.

pub mod errors;
pub mod product;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use product::{Product, ProductInput, ProductRepository, ProductService};
