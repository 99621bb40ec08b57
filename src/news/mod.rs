//! News fetching

pub mod client;

pub use client::NewsClient;

/// Category shortcuts offered alongside free-text search
pub const CATEGORIES: [&str; 5] = ["Sports", "Politics", "Entertainment", "Health", "Fitness"];
