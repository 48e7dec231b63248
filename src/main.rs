//! One Piece TCG Price Finder
//!
//! Serves the price finder UI and search API. Without any `--price-source`
//! the search endpoint answers with fixed stub prices.

use clap::Parser;
use optcg_price_finder::{BestPriceFinder, FixedPriceFinder, PriceFinder, PriceSourceSpec};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

/// One Piece TCG price finder web service
#[derive(Parser, Debug)]
#[command(name = "optcg_price_finder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to bind the web server to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Store price list: JSON file path or http(s) URL (repeatable)
    #[arg(short = 's', long = "price-source")]
    price_sources: Vec<PriceSourceSpec>,

    /// How long fetched price lists stay fresh, in seconds
    #[arg(long, default_value_t = 900)]
    cache_ttl_secs: u64,

    /// Timeout for fetching a remote price list, in seconds
    #[arg(long, default_value_t = 10)]
    fetch_timeout_secs: u64,
}

/// Build the finder from the configured price sources
fn build_finder(args: &Args) -> optcg_price_finder::Result<Arc<dyn PriceFinder>> {
    if args.price_sources.is_empty() {
        log::warn!("No price sources configured, search returns fixed stub prices");
        return Ok(Arc::new(FixedPriceFinder));
    }

    let ttl = Duration::from_secs(args.cache_ttl_secs);
    let timeout = Duration::from_secs(args.fetch_timeout_secs);

    let sources = args
        .price_sources
        .iter()
        .map(|spec| spec.build(ttl, timeout))
        .collect::<optcg_price_finder::Result<Vec<_>>>()?;

    for source in &sources {
        log::info!("Price source: {}", source.name());
    }

    Ok(Arc::new(BestPriceFinder::new(sources)))
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting optcg_price_finder...");

    let finder = match build_finder(&args) {
        Ok(finder) => finder,
        Err(e) => {
            log::error!("Failed to set up price sources: {}", e);
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::new(args.host, args.port);
    if let Err(e) = optcg_price_finder::web::serve(addr, finder).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_upstream_service() {
        let args = Args::try_parse_from(["optcg_price_finder"]).unwrap();

        assert_eq!(args.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(args.port, 8000);
        assert!(args.price_sources.is_empty());
        assert_eq!(args.cache_ttl_secs, 900);
        assert_eq!(args.fetch_timeout_secs, 10);
    }

    #[test]
    fn price_sources_are_repeatable() {
        let args = Args::try_parse_from([
            "optcg_price_finder",
            "-s",
            "stores/card_bot.json",
            "--price-source",
            "https://example.com/cherry.json",
        ])
        .unwrap();

        assert_eq!(
            args.price_sources,
            vec![
                PriceSourceSpec::parse("stores/card_bot.json"),
                PriceSourceSpec::Http("https://example.com/cherry.json".to_string()),
            ]
        );
    }

    #[test]
    fn no_sources_builds_fixed_finder() {
        let args = Args::try_parse_from(["optcg_price_finder"]).unwrap();
        let finder = build_finder(&args).unwrap();
        assert_eq!(finder.name(), "fixed");
    }

    #[test]
    fn file_source_builds_best_price_finder() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"store": "Card Bot", "prices": {{"OP02-096": 2.5}}}}"#).unwrap();
        let path = tmp.path().display().to_string();

        let args = Args::try_parse_from(["optcg_price_finder", "-s", path.as_str()]).unwrap();
        let finder = build_finder(&args).unwrap();
        assert_eq!(finder.name(), "best_price");
    }

    #[test]
    fn missing_source_file_fails_setup() {
        let args =
            Args::try_parse_from(["optcg_price_finder", "-s", "/nonexistent/prices.json"]).unwrap();
        assert!(build_finder(&args).is_err());
    }
}
