//! Proxy data models

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Proxy kind enumeration
///
/// `Socks` is the aggregate tag carried by sources that publish socks4 and
/// socks5 entries in one mixed feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProxyKind {
    #[default]
    Http,
    Https,
    Socks4,
    Socks5,
    Socks,
}

impl ProxyKind {
    /// All kind labels accepted on the command line.
    pub const SUPPORTED: &'static [&'static str] =
        &["http", "https", "socks", "socks4", "socks5", "all"];

    /// The label used in source URLs and for tagged-feed line matching.
    pub fn label(&self) -> &'static str {
        match self {
            ProxyKind::Http => "http",
            ProxyKind::Https => "https",
            ProxyKind::Socks4 => "socks4",
            ProxyKind::Socks5 => "socks5",
            ProxyKind::Socks => "socks",
        }
    }

    /// Resolve a requested kind string to the set of source tags to select.
    ///
    /// - `all` selects the four concrete kinds (mixed `socks` feeds are
    ///   excluded: their entries are already published under socks4/socks5
    ///   elsewhere and the feed cannot be split without its tags)
    /// - `socks` selects socks-tagged feeds plus socks4 and socks5
    /// - a single concrete kind selects only itself
    ///
    /// Unknown strings fail before any network activity.
    pub fn resolve(requested: &str) -> Result<Vec<ProxyKind>> {
        match requested {
            "all" => Ok(vec![
                ProxyKind::Http,
                ProxyKind::Https,
                ProxyKind::Socks4,
                ProxyKind::Socks5,
            ]),
            "socks" => Ok(vec![ProxyKind::Socks, ProxyKind::Socks4, ProxyKind::Socks5]),
            "http" => Ok(vec![ProxyKind::Http]),
            "https" => Ok(vec![ProxyKind::Https]),
            "socks4" => Ok(vec![ProxyKind::Socks4]),
            "socks5" => Ok(vec![ProxyKind::Socks5]),
            other => Err(anyhow!(
                "Unsupported proxy kind: {}. Use: {}",
                other,
                ProxyKind::SUPPORTED.join(", ")
            )),
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
