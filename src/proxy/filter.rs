//! Address filter for extracting IP:PORT strings from raw text

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex pattern to match IPv4 addresses with an optional port in text
///
/// Deliberately lenient: octet and port ranges are not validated, matching
/// what the upstream feeds themselves publish. `999.999.999.999:99999`
/// passes the default filter.
static ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}(?:\.\d{1,3}){3}(?::\d{1,5})?").expect("Invalid address regex")
});

/// Filter that reduces arbitrary text to the addresses embedded in it
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressFilter {
    /// Reject octets above 255 and ports outside 1-65535
    pub strict: bool,
}

impl AddressFilter {
    /// Create a lenient filter (the default behavior)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter that validates octet and port ranges
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Return every non-overlapping address match in left-to-right order.
    ///
    /// Matching is a substring search over the whole body, so addresses
    /// embedded in HTML, JSON or surrounding prose are picked up too.
    /// Duplicates are kept; deduplication happens at aggregation time.
    pub fn extract(&self, body: &str) -> Vec<String> {
        ADDRESS_REGEX
            .find_iter(body)
            .map(|m| m.as_str().to_string())
            .filter(|addr| !self.strict || Self::in_range(addr))
            .collect()
    }

    /// Range validation used by strict mode only.
    fn in_range(addr: &str) -> bool {
        let (host, port) = match addr.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (addr, None),
        };

        for octet in host.split('.') {
            match octet.parse::<u32>() {
                Ok(n) if n <= 255 => {}
                _ => return false,
            }
        }

        match port {
            Some(p) => matches!(p.parse::<u32>(), Ok(n) if (1..=65535).contains(&n)),
            None => true,
        }
    }
}
