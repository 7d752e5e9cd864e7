
/// Product entity CRUD against a live Postgres
pub mod product_tests;
