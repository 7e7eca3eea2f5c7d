// Listing Optimizer - API Core
//
// Fetches a product listing by ASIN, rewrites it through a language model,
// and keeps both versions for later comparison.
//
// Pipeline stages live in domains/products; infrastructure behind Base* traits in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
