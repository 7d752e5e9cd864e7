//! The product resource: domain types, boundary validation, persistence gateway and service.

pub mod domain;
pub mod file_repository;
pub mod repository;
pub mod service;
pub mod validation;

pub use domain::{Product, ProductInput};
pub use file_repository::FileProductRepository;
pub use repository::{ProductRepository, SeaOrmProductRepository};
pub use service::ProductService;
pub use validation::{parse_id, validate_payload};
