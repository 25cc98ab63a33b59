//! Proxy Harvest - Free Proxy List Scraper
//!
//! This is a batch scraper that collects proxy addresses from dozens of
//! public sources (plain-text feeds, JSON APIs, HTML tables and div grids),
//! deduplicates them and writes the combined list to a file.

pub mod proxy;

pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
