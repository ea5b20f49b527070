pub mod model;
mod routes;
pub mod service;

pub use routes::routes;
pub use service::{ProgressUpdate, update_stats};
