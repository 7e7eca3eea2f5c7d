pub mod process_product;
pub mod queries;

pub use process_product::*;
pub use queries::*;
