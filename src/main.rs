use anyhow::{anyhow, Result};
use clap::Parser;
use proxy_harvest::{catalog, select, write_addresses, Crawler, CrawlerConfig, ProxyKind};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Scrape free proxy lists into one deduplicated file
#[derive(Parser)]
#[command(name = "proxy-harvest")]
#[command(about = "Scrape free proxy lists into one deduplicated file")]
struct Cli {
    /// Proxy kind to collect: http, https, socks, socks4, socks5, all
    #[arg(short, long)]
    proxy: String,

    /// Output file name to save the scraped list
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Increase output verbosity
    #[arg(short, long)]
    verbose: bool,

    /// Timeout in seconds for each HTTP request
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Drop addresses with out-of-range octets or ports
    #[arg(long)]
    strict: bool,

    /// Stop paginating a source after the first page with no addresses
    #[arg(long)]
    stop_on_empty_page: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let started = Instant::now();

    // Argument validation happens before any network activity.
    let kinds = ProxyKind::resolve(&cli.proxy)?;
    let sources = catalog();
    let selected = select(&sources, &kinds);
    if selected.is_empty() {
        return Err(anyhow!("No sources available for proxy kind: {}", cli.proxy));
    }

    if cli.verbose {
        println!("Scraping proxies...");
    }

    let config = CrawlerConfig::new()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_strict(cli.strict)
        .with_stop_on_empty_page(cli.stop_on_empty_page);
    let crawler = Crawler::with_config(config)?;

    let addresses = crawler.harvest(&selected, cli.verbose).await;

    if cli.verbose {
        println!("Writing {} proxies to file...", addresses.len());
    }
    write_addresses(&cli.output, &addresses)?;

    if cli.verbose {
        println!("Done!");
        println!("Took {:.2} seconds", started.elapsed().as_secs_f64());
    }

    Ok(())
}
