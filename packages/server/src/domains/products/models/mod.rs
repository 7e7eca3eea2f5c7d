pub mod listing;
pub mod product_optimization;

pub use listing::*;
pub use product_optimization::*;
