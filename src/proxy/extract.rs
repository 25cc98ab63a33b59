//! Body-to-token extraction rules
//!
//! Every source falls into one of a small set of response shapes. Instead of
//! one type per website, the shape is a tagged variant carried by the source
//! record, parameterized with the selectors that differ between sites.

use scraper::{ElementRef, Html, Selector};

use crate::proxy::filter::AddressFilter;
use crate::proxy::models::ProxyKind;

/// Which table cells make up one address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cells {
    /// The first cell already holds `ip:port`
    First,
    /// IP and port sit in separate columns, joined with `:`
    IpPort,
}

/// Response shape of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Loosely formatted text; run the address filter over the whole body
    Regex,
    /// One `scheme://host:port` entry per line; keep lines tagged with the
    /// source's kind label, strip the scheme, then run the address filter
    Tagged,
    /// HTML table, one address per row
    Table {
        /// CSS selector for the table, `None` for the first `<table>`
        selector: Option<&'static str>,
        cells: Cells,
    },
    /// Grid of nested divs, first two cell-divs per row joined with `:`
    DivGrid {
        container: &'static str,
        cell: &'static str,
    },
}

impl Extract {
    /// Extract raw tokens from a response body.
    ///
    /// Never fails: an empty, truncated or restructured body yields an empty
    /// list. Tokens may repeat; deduplication happens at aggregation time.
    pub fn tokens(&self, body: &str, kind: ProxyKind, filter: &AddressFilter) -> Vec<String> {
        match self {
            Extract::Regex => filter.extract(body),
            Extract::Tagged => Self::tagged_tokens(body, kind, filter),
            Extract::Table { selector, cells } => {
                Self::table_tokens(body, selector.unwrap_or("table"), *cells)
            }
            Extract::DivGrid { container, cell } => Self::div_tokens(body, container, cell),
        }
    }

    fn tagged_tokens(body: &str, kind: ProxyKind, filter: &AddressFilter) -> Vec<String> {
        let mut tokens = Vec::new();
        for line in body.lines() {
            if !line.contains(kind.label()) {
                continue;
            }
            // "socks5://1.2.3.4:80" -> "1.2.3.4:80"
            let stripped = line.rsplit("//").next().unwrap_or(line);
            tokens.extend(filter.extract(stripped));
        }
        tokens
    }

    fn table_tokens(body: &str, selector: &str, cells: Cells) -> Vec<String> {
        let (table_sel, row_sel, cell_sel) = match (
            Selector::parse(selector),
            Selector::parse("tr"),
            Selector::parse("td"),
        ) {
            (Ok(t), Ok(r), Ok(c)) => (t, r, c),
            _ => return Vec::new(),
        };

        let document = Html::parse_document(body);
        let table = match document.select(&table_sel).next() {
            Some(table) => table,
            None => return Vec::new(),
        };

        let mut tokens = Vec::new();
        for row in table.select(&row_sel) {
            let texts: Vec<String> = row.select(&cell_sel).map(Self::cell_text).collect();
            let token = match (cells, texts.as_slice()) {
                (Cells::First, [first, ..]) => first.clone(),
                (Cells::IpPort, [ip, port, ..]) => format!("{}:{}", ip, port),
                // fewer data cells than the shape expects: skip the row
                _ => continue,
            };
            if !token.is_empty() {
                tokens.push(token);
            }
        }
        tokens
    }

    fn div_tokens(body: &str, container: &str, cell: &str) -> Vec<String> {
        let (container_sel, row_sel, cell_sel) = match (
            Selector::parse(container),
            Selector::parse("div"),
            Selector::parse(cell),
        ) {
            (Ok(t), Ok(r), Ok(c)) => (t, r, c),
            _ => return Vec::new(),
        };

        let document = Html::parse_document(body);
        let grid = match document.select(&container_sel).next() {
            Some(grid) => grid,
            None => return Vec::new(),
        };

        let mut tokens = Vec::new();
        for row in grid.select(&row_sel) {
            let texts: Vec<String> = row.select(&cell_sel).take(2).map(Self::cell_text).collect();
            if let [ip, port] = texts.as_slice() {
                tokens.push(format!("{}:{}", ip, port));
            }
        }
        tokens
    }

    fn cell_text(cell: ElementRef) -> String {
        cell.text()
            .collect::<String>()
            .replace('\u{a0}', "")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient() -> AddressFilter {
        AddressFilter::new()
    }

    #[test]
    fn test_regex_extract_over_body() {
        let tokens = Extract::Regex.tokens("a 1.2.3.4:80 b 5.6.7.8 c", ProxyKind::Http, &lenient());
        assert_eq!(tokens, vec!["1.2.3.4:80".to_string(), "5.6.7.8".to_string()]);
    }

    #[test]
    fn test_tagged_keeps_matching_lines_and_strips_scheme() {
        let body = "socks4://1.1.1.1:1080\nhttp://2.2.2.2:8080\nsocks5://3.3.3.3:1080\n";
        let tokens = Extract::Tagged.tokens(body, ProxyKind::Socks4, &lenient());
        assert_eq!(tokens, vec!["1.1.1.1:1080".to_string()]);
    }

    #[test]
    fn test_tagged_socks_label_matches_both_socks_kinds() {
        let body = "socks4://1.1.1.1:1080\nhttp://2.2.2.2:8080\nsocks5://3.3.3.3:1080\n";
        let tokens = Extract::Tagged.tokens(body, ProxyKind::Socks, &lenient());
        assert_eq!(
            tokens,
            vec!["1.1.1.1:1080".to_string(), "3.3.3.3:1080".to_string()]
        );
    }

    #[test]
    fn test_table_first_cell_skips_rows_without_cells() {
        let body = r#"<html><body><table>
            <tr><th>IP</th></tr>
            <tr><td>1.1.1.1</td><td>US</td></tr>
            <tr><td>2.2.2.2</td><td>DE</td></tr>
            <tr></tr>
        </table></body></html>"#;
        let extract = Extract::Table {
            selector: None,
            cells: Cells::First,
        };
        let tokens = extract.tokens(body, ProxyKind::Http, &lenient());
        assert_eq!(tokens, vec!["1.1.1.1".to_string(), "2.2.2.2".to_string()]);
    }

    #[test]
    fn test_table_ip_port_cells_joined() {
        let body = r#"<table class="table table-striped">
            <tr><td>1.1.1.1</td><td>8080</td><td>US</td></tr>
            <tr><td>2.2.2.2</td></tr>
        </table>"#;
        let extract = Extract::Table {
            selector: Some("table.table-striped"),
            cells: Cells::IpPort,
        };
        let tokens = extract.tokens(body, ProxyKind::Http, &lenient());
        // the one-cell row is skipped, not padded
        assert_eq!(tokens, vec!["1.1.1.1:8080".to_string()]);
    }

    #[test]
    fn test_table_class_selector_must_match() {
        let body = "<table><tr><td>1.1.1.1</td></tr></table>";
        let extract = Extract::Table {
            selector: Some("table.listing"),
            cells: Cells::First,
        };
        assert!(extract.tokens(body, ProxyKind::Http, &lenient()).is_empty());
    }

    #[test]
    fn test_div_grid() {
        let body = r#"<div class="list">
            <div><div class="td">1.1.1.1</div><div class="td">80</div><div class="td">US</div></div>
            <div><div class="td">2.2.2.2</div><div class="td">3128</div></div>
            <div><div class="other">x</div></div>
        </div>"#;
        let extract = Extract::DivGrid {
            container: "div.list",
            cell: "div.td",
        };
        let tokens = extract.tokens(body, ProxyKind::Http, &lenient());
        assert_eq!(
            tokens,
            vec!["1.1.1.1:80".to_string(), "2.2.2.2:3128".to_string()]
        );
    }

    #[test]
    fn test_malformed_bodies_yield_nothing() {
        let shapes = [
            Extract::Regex,
            Extract::Tagged,
            Extract::Table {
                selector: None,
                cells: Cells::First,
            },
            Extract::DivGrid {
                container: "div.list",
                cell: "div.td",
            },
        ];
        for shape in shapes {
            assert!(shape.tokens("", ProxyKind::Http, &lenient()).is_empty());
            assert!(shape
                .tokens("<<<%% not html at all", ProxyKind::Http, &lenient())
                .is_empty());
        }
    }
}
