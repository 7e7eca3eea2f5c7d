//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod optimization_store;
pub mod page_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use ai::{OpenAIClient, OpenAIConfig};
pub use deps::ServerDeps;
pub use optimization_store::{connect_database, DatabaseConfig, PostgresOptimizationStore};
pub use page_fetcher::{AmazonPageFetcher, ScraperConfig};
pub use test_dependencies::TestDependencies;
pub use traits::*;
