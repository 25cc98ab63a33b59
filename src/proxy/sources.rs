//! Static catalog of free proxy sources
//!
//! Each upstream is one `Source` record: kind tag, URL template and response
//! shape. Adding a source means appending a record here, not writing code.
//! The catalog is built once at startup and passed explicitly to the crawler.

use crate::proxy::extract::{Cells, Extract};
use crate::proxy::models::ProxyKind;

/// One upstream proxy listing
///
/// Immutable after construction. The URL may carry a `{page}` or `{offset}`
/// placeholder filled in per fetched page.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: &'static str,
    pub kind: ProxyKind,
    pub url: String,
    pub first_page: u32,
    pub last_page: u32,
    pub offset_step: u32,
    pub extract: Extract,
}

impl Source {
    pub fn new(name: &'static str, kind: ProxyKind, url: impl Into<String>) -> Self {
        Self {
            name,
            kind,
            url: url.into(),
            first_page: 1,
            last_page: 1,
            offset_step: 0,
            extract: Extract::Regex,
        }
    }

    /// Inclusive page range substituted for `{page}` and `{offset}`
    pub fn pages(mut self, first: u32, last: u32) -> Self {
        self.first_page = first;
        self.last_page = last;
        self
    }

    /// Multiplier for the `{offset}` placeholder (`offset = page * step`)
    pub fn offset_step(mut self, step: u32) -> Self {
        self.offset_step = step;
        self
    }

    pub fn extract(mut self, extract: Extract) -> Self {
        self.extract = extract;
        self
    }

    /// Render the request URL for one page.
    pub fn url_for(&self, page: u32) -> String {
        self.url
            .replace("{page}", &page.to_string())
            .replace("{offset}", &(page * self.offset_step).to_string())
    }

    /// The URL shown in progress output (the first page's).
    pub fn display_url(&self) -> String {
        self.url_for(self.first_page)
    }

    pub fn page_range(&self) -> std::ops::RangeInclusive<u32> {
        self.first_page..=self.last_page
    }
}

/// Shape of the free-proxy-list.net family of tables
const FPL_TABLE: Extract = Extract::Table {
    selector: Some("table.table.table-striped.table-bordered"),
    cells: Cells::IpPort,
};

/// Generic table where the first cell already holds `ip:port`
const FIRST_CELL_TABLE: Extract = Extract::Table {
    selector: None,
    cells: Cells::First,
};

/// Generic table with separate IP and port columns
const IP_PORT_TABLE: Extract = Extract::Table {
    selector: None,
    cells: Cells::IpPort,
};

const ALL_KINDS: [ProxyKind; 4] = [
    ProxyKind::Http,
    ProxyKind::Https,
    ProxyKind::Socks4,
    ProxyKind::Socks5,
];

/// A raw newline-delimited list hosted on GitHub
fn github_raw(name: &'static str, kind: ProxyKind, path: &str) -> Source {
    Source::new(
        name,
        kind,
        format!("https://raw.githubusercontent.com/{}", path),
    )
}

/// A raw GitHub list with `scheme://host:port` lines shared by several kinds
fn github_tagged(name: &'static str, kind: ProxyKind, path: &str) -> Source {
    github_raw(name, kind, path).extract(Extract::Tagged)
}

/// Build the full source catalog.
pub fn catalog() -> Vec<Source> {
    let mut sources = Vec::new();

    // Plain-text feeds
    sources.push(Source::new("spys.me", ProxyKind::Http, "https://spys.me/proxy.txt"));
    sources.push(Source::new("spys.me", ProxyKind::Socks, "https://spys.me/socks.txt"));

    // Query-parameterized APIs, responses handled as plain text
    for kind in [ProxyKind::Http, ProxyKind::Socks4, ProxyKind::Socks5] {
        sources.push(Source::new(
            "proxyscrape.com",
            kind,
            format!(
                "https://api.proxyscrape.com/?request=getproxies&proxytype={}&timeout=1000&country=All",
                kind.label()
            ),
        ));
    }
    sources.push(Source::new(
        "geonode.com",
        ProxyKind::Socks,
        "https://proxylist.geonode.com/api/proxy-list?&limit=500&page=1&sort_by=lastChecked&sort_type=desc",
    ));
    for kind in ALL_KINDS {
        sources.push(Source::new(
            "geonode.com",
            kind,
            "https://proxylist.geonode.com/api/proxy-list?&limit=500&page=1&sort_by=lastChecked&sort_type=desc",
        ));
    }
    for (kind, anon) in [
        (ProxyKind::Https, "elite"),
        (ProxyKind::Http, "elite"),
        (ProxyKind::Http, "transparent"),
        (ProxyKind::Http, "anonymous"),
    ] {
        sources.push(Source::new(
            "proxy-list.download",
            kind,
            format!(
                "https://www.proxy-list.download/api/v1/get?type={}&anon={}",
                kind.label(),
                anon
            ),
        ));
    }

    // Class-matched HTML tables of the free-proxy-list.net network
    for (kind, url) in [
        (ProxyKind::Https, "http://sslproxies.org"),
        (ProxyKind::Http, "http://free-proxy-list.net"),
        (ProxyKind::Http, "http://us-proxy.org"),
        (ProxyKind::Socks, "http://socks-proxy.net"),
    ] {
        sources.push(Source::new("free-proxy-list.net network", kind, url).extract(FPL_TABLE));
    }
    for kind in [ProxyKind::Http, ProxyKind::Https] {
        sources.push(Source::new("free-proxy-list.net", kind, "https://free-proxy-list.net/").extract(IP_PORT_TABLE));
    }
    // sslproxies.org is scraped under both table shapes: whichever matches
    // the current page layout contributes, the other yields nothing
    sources.push(Source::new("sslproxies.org", ProxyKind::Https, "https://www.sslproxies.org/").extract(FIRST_CELL_TABLE));
    sources.push(Source::new("sslproxies.org", ProxyKind::Https, "https://www.sslproxies.org/").extract(IP_PORT_TABLE));
    sources.push(Source::new("socks-proxy.net", ProxyKind::Socks, "https://www.socks-proxy.net/").extract(IP_PORT_TABLE));
    for kind in [ProxyKind::Http, ProxyKind::Https] {
        sources.push(Source::new("us-proxy.org", kind, "https://us-proxy.org/").extract(IP_PORT_TABLE));
    }

    // Div grid
    sources.push(
        Source::new("lunaproxy.com", ProxyKind::Http, "https://freeproxy.lunaproxy.com/").extract(
            Extract::DivGrid {
                container: "div.list",
                cell: "div.td",
            },
        ),
    );

    // Tagged GitHub lists shared by several kinds
    for kind in [ProxyKind::Http, ProxyKind::Socks4, ProxyKind::Socks5] {
        sources.push(github_tagged(
            "proxifly",
            kind,
            "proxifly/free-proxy-list/main/proxies/all/data.txt",
        ));
    }
    for kind in [ProxyKind::Http, ProxyKind::Socks] {
        sources.push(github_tagged(
            "monosans",
            kind,
            "monosans/proxy-list/main/proxies/all.txt",
        ));
    }
    for kind in ALL_KINDS {
        sources.push(github_tagged(
            "zloi-user",
            kind,
            &format!("zloi-user/hideip.me/main/{}.txt", kind.label()),
        ));
    }

    // proxydb.net, offset-style pagination (one window of 15)
    for kind in [ProxyKind::Http, ProxyKind::Socks4, ProxyKind::Socks5] {
        sources.push(
            Source::new(
                "proxydb.net",
                kind,
                format!("http://proxydb.net/?protocol={}&offset={{offset}}", kind.label()),
            )
            .pages(0, 0)
            .offset_step(15)
            .extract(FIRST_CELL_TABLE),
        );
    }

    // Direct GitHub raw lists
    sources.push(github_raw("sunny9577", ProxyKind::Http, "sunny9577/proxy-scraper/refs/heads/master/proxies.txt"));
    sources.push(github_raw("monosans", ProxyKind::Http, "monosans/proxy-list/refs/heads/main/proxies/all.txt"));
    sources.push(github_raw("TheSpeedX", ProxyKind::Http, "TheSpeedX/PROXY-List/refs/heads/master/http.txt"));
    sources.push(github_raw("TheSpeedX", ProxyKind::Socks4, "TheSpeedX/PROXY-List/refs/heads/master/socks4.txt"));
    sources.push(github_raw("TheSpeedX", ProxyKind::Socks5, "TheSpeedX/PROXY-List/refs/heads/master/socks5.txt"));
    sources.push(github_raw("gitrecon1455", ProxyKind::Http, "gitrecon1455/ProxyScraper/refs/heads/main/proxies.txt"));
    sources.push(github_raw("zebbern", ProxyKind::Http, "zebbern/Proxy-Scraper/refs/heads/main/proxies.txt"));
    sources.push(github_raw("Isloka", ProxyKind::Http, "Isloka/proxyscraper/refs/heads/main/proxies/http.txt"));
    sources.push(github_raw("Isloka", ProxyKind::Socks, "Isloka/proxyscraper/refs/heads/main/proxies/socks.txt"));
    sources.push(github_raw("ProxyScraper", ProxyKind::Http, "ProxyScraper/ProxyScraper/refs/heads/main/http.txt"));
    sources.push(github_raw("ProxyScraper", ProxyKind::Socks4, "ProxyScraper/ProxyScraper/refs/heads/main/socks4.txt"));
    sources.push(github_raw("ProxyScraper", ProxyKind::Socks5, "ProxyScraper/ProxyScraper/refs/heads/main/socks5.txt"));
    sources.push(github_raw("lalifeier", ProxyKind::Https, "lalifeier/proxy-scraper/refs/heads/main/proxies/https.txt"));
    sources.push(github_raw("lalifeier", ProxyKind::Socks4, "lalifeier/proxy-scraper/refs/heads/main/proxies/socks4.txt"));
    sources.push(github_raw("gingteam", ProxyKind::Http, "gingteam/proxy-scraper/refs/heads/main/proxies.txt"));
    sources.push(github_raw("CNMengHan", ProxyKind::Http, "CNMengHan/ProxyPool/refs/heads/main/proxy.txt"));
    sources.push(github_raw("r00tee", ProxyKind::Socks4, "r00tee/Proxy-List/refs/heads/main/Socks4.txt"));
    sources.push(github_raw("r00tee", ProxyKind::Socks5, "r00tee/Proxy-List/refs/heads/main/Socks5.txt"));
    sources.push(github_raw("r00tee", ProxyKind::Https, "r00tee/Proxy-List/refs/heads/main/Https.txt"));
    sources.push(github_raw("hookzof", ProxyKind::Socks5, "hookzof/socks5_list/refs/heads/master/proxy.txt"));
    sources.push(github_raw("ErcinDedeoglu", ProxyKind::Socks5, "ErcinDedeoglu/proxies/refs/heads/main/proxies/socks5.txt"));
    sources.push(github_raw("ErcinDedeoglu", ProxyKind::Socks4, "ErcinDedeoglu/proxies/refs/heads/main/proxies/socks4.txt"));
    sources.push(github_raw("SevenworksDev", ProxyKind::Socks5, "SevenworksDev/proxy-list/refs/heads/main/proxies/socks5.txt"));
    sources.push(github_raw("TuanMinPay", ProxyKind::Http, "TuanMinPay/live-proxy/refs/heads/master/all.txt"));
    sources.push(github_raw("roosterkid", ProxyKind::Socks5, "roosterkid/openproxylist/refs/heads/main/SOCKS5_RAW.txt"));
    sources.push(github_raw("roosterkid", ProxyKind::Socks4, "roosterkid/openproxylist/refs/heads/main/SOCKS4_RAW.txt"));

    // proxy-spider.com per-location tables
    for location in [
        "us-united-states",
        "cn-china",
        "retrusion",
        "au-australia",
        "de-germany",
        "id-indonesia",
        "ca-canada",
        "ir-iran",
        "in-india",
    ] {
        sources.push(
            Source::new(
                "proxy-spider.com",
                ProxyKind::Http,
                format!("https://proxy-spider.com/proxies/locations/{}", location),
            )
            .extract(FIRST_CELL_TABLE),
        );
    }

    // Multi-kind table sites
    for kind in ALL_KINDS {
        sources.push(
            Source::new("advanced.name", kind, "https://advanced.name/freeproxy?page={page}")
                .pages(1, 5)
                .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new("premiumproxy.net", kind, "https://premiumproxy.net/")
                .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new(
                "free-proxy-list.net/web-proxy",
                kind,
                "https://free-proxy-list.net/web-proxy.html",
            )
            .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new("premproxy.com", kind, "https://premproxy.com/list/type-0{page}.htm")
                .pages(1, 7)
                .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new(
                "plainproxies.com",
                kind,
                "https://plainproxies.com/resources/free-proxy-list?page={page}",
            )
            .pages(1, 5)
            .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new(
                "proxy-list.org",
                kind,
                "https://proxy-list.org/english/index.php?p={page}",
            )
            .pages(1, 10)
            .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new("hasdata.com", kind, "https://hasdata.com/free-proxy-list")
                .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new(
                "proxybros.com",
                kind,
                "https://proxybros.com/free-proxy-list/speed-1500/{page}/",
            )
            .pages(1, 30)
            .extract(FIRST_CELL_TABLE),
        );
        sources.push(
            Source::new(
                "freeproxy.world",
                kind,
                "https://www.freeproxy.world/?type=&anonymity=&country=&speed=&port=&page={page}",
            )
            .pages(1, 139)
            .extract(IP_PORT_TABLE),
        );
        sources.push(
            Source::new(
                "iproyal.com",
                kind,
                "https://iproyal.com/free-proxy-list/?page={page}&entries=100",
            )
            .pages(1, 60)
            .extract(IP_PORT_TABLE),
        );
        sources.push(
            Source::new(
                "hidemy.name",
                kind,
                format!("https://hidemy.name/en/proxy-list/?type={}&start={{offset}}", kind.label()),
            )
            .pages(1, 5)
            .offset_step(64)
            .extract(IP_PORT_TABLE),
        );
    }

    sources
}

/// Select every source whose kind tag is in the resolved set.
///
/// Deterministic: catalog order is preserved and nothing else is included.
pub fn select<'a>(sources: &'a [Source], kinds: &[ProxyKind]) -> Vec<&'a Source> {
    sources.iter().filter(|s| kinds.contains(&s.kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_nonempty_and_stable() {
        let first = catalog();
        let second = catalog();
        assert!(!first.is_empty());
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.url, b.url);
        }
    }

    #[test]
    fn test_select_all_takes_exactly_the_concrete_kinds() {
        let sources = catalog();
        let kinds = ProxyKind::resolve("all").unwrap();
        let selected = select(&sources, &kinds);
        assert!(selected.iter().all(|s| s.kind != ProxyKind::Socks));
        let expected = sources.iter().filter(|s| s.kind != ProxyKind::Socks).count();
        assert_eq!(selected.len(), expected);
    }

    #[test]
    fn test_select_socks_includes_mixed_feeds() {
        let sources = catalog();
        let kinds = ProxyKind::resolve("socks").unwrap();
        let selected = select(&sources, &kinds);
        assert!(selected.iter().any(|s| s.kind == ProxyKind::Socks));
        assert!(selected.iter().any(|s| s.kind == ProxyKind::Socks4));
        assert!(selected.iter().all(|s| {
            matches!(s.kind, ProxyKind::Socks | ProxyKind::Socks4 | ProxyKind::Socks5)
        }));
    }

    #[test]
    fn test_select_single_kind() {
        let sources = catalog();
        let selected = select(&sources, &[ProxyKind::Socks5]);
        assert!(!selected.is_empty());
        assert!(selected.iter().all(|s| s.kind == ProxyKind::Socks5));
    }

    #[test]
    fn test_https_keeps_the_fpl_network_sites() {
        let sources = catalog();
        let selected = select(&sources, &[ProxyKind::Https]);
        assert!(selected
            .iter()
            .any(|s| s.name == "free-proxy-list.net" && s.url == "https://free-proxy-list.net/"));
        assert!(selected
            .iter()
            .any(|s| s.name == "us-proxy.org"));
    }

    #[test]
    fn test_sslproxies_is_scraped_under_both_table_shapes() {
        let sources = catalog();
        let shapes: Vec<_> = sources
            .iter()
            .filter(|s| s.url == "https://www.sslproxies.org/")
            .map(|s| s.extract)
            .collect();
        assert!(shapes.contains(&FIRST_CELL_TABLE));
        assert!(shapes.contains(&IP_PORT_TABLE));
        assert!(sources
            .iter()
            .filter(|s| s.url == "https://www.sslproxies.org/")
            .all(|s| s.kind == ProxyKind::Https));
    }

    #[test]
    fn test_page_placeholder_rendering() {
        let source = Source::new("t", ProxyKind::Http, "https://example.com/list?page={page}")
            .pages(1, 3);
        assert_eq!(source.url_for(2), "https://example.com/list?page=2");
        assert_eq!(source.page_range().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_offset_placeholder_rendering() {
        let source = Source::new("t", ProxyKind::Http, "https://example.com/?start={offset}")
            .pages(1, 5)
            .offset_step(64);
        assert_eq!(source.url_for(1), "https://example.com/?start=64");
        assert_eq!(source.url_for(5), "https://example.com/?start=320");
    }

    #[test]
    fn test_every_catalog_url_renders_without_placeholders() {
        for source in catalog() {
            for page in source.page_range() {
                let url = source.url_for(page);
                assert!(!url.contains('{'), "unrendered placeholder in {}", url);
                assert!(url.starts_with("http"), "bad url {}", url);
            }
        }
    }
}
