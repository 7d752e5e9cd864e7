pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_app, build_repository, run};
pub use state::AppState;
