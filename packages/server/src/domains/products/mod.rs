//! Products domain: scrape a listing, optimize it, keep the history.

pub mod activities;
pub mod extraction;
pub mod locators;
pub mod models;
pub mod optimizer;
pub mod prompts;

pub use activities::*;
pub use models::*;
