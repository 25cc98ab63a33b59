//! Proxy module for scraping free proxy lists
//!
//! This module provides functionality for:
//! - A static catalog of free proxy sources and their extraction rules
//! - Fetching every matching source concurrently and collecting results
//! - Extracting proxy addresses from plain text, HTML tables and div grids
//! - Filtering raw text down to IP:PORT address strings

pub mod crawler;
pub mod extract;
pub mod filter;
pub mod models;
pub mod sources;
pub mod writer;

pub use crawler::{Crawler, CrawlerConfig};
pub use extract::{Cells, Extract};
pub use filter::AddressFilter;
pub use models::ProxyKind;
pub use sources::{catalog, select, Source};
pub use writer::write_addresses;
