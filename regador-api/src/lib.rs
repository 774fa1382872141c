pub mod models;
pub mod restful;
pub mod routes;

pub use models::*;
pub use restful::*;
