// HTTP server setup (Axum + embedded presentation layer)
pub mod app;
pub mod response;
pub mod routes;
pub mod static_files;

pub use app::*;
pub use response::*;
