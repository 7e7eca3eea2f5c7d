// Business domains
pub mod products;
