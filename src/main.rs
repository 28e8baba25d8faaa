use clap::Parser;
use tracing_subscriber::EnvFilter;

use bazaar_search::errors::StoreKind;
use bazaar_search::models::{ItemFilter, ListingFilter, Stat};
use bazaar_search::pipeline::{Direction, ItemEffects};
use bazaar_search::storage::{ContentDatabase, TraderDatabase};
use bazaar_search::{Bazaar, BazaarConfig, BazaarError, Result, SearchPage, SearchRequest};

/// Search the bazaar: player shop listings joined with the item catalog.
#[derive(Debug, Parser)]
#[command(name = "bazaar", version)]
struct Args {
    /// Trader store (listings and characters)
    #[arg(long, env = "TRADER_DATABASE_URL")]
    trader_db: Option<String>,
    /// Content store (items); defaults to the trader store
    #[arg(long, env = "CONTENT_DATABASE_URL")]
    content_db: Option<String>,
    #[arg(long, env = "BAZAAR_PER_PAGE")]
    per_page: Option<usize>,

    /// Only this seller's listings
    #[arg(long = "char", default_value = "")]
    seller: String,
    /// Minimum price, in platinum; 0 for none
    #[arg(long)]
    pricemin: Option<i64>,
    /// Maximum price, in platinum; 0 for none
    #[arg(long)]
    pricemax: Option<i64>,
    /// Item name; spaces match any run of characters
    #[arg(long, default_value = "")]
    item: String,
    /// Class bitmask, -1 for any
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    class: i64,
    /// Race bitmask, -1 for any
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    race: i64,
    /// Equip slot bitmask, -1 for any
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    slot: i64,
    /// Item type code, -1 for any
    #[arg(long = "type", default_value_t = -1, allow_negative_numbers = true)]
    item_type: i64,
    /// Stat column to show and sort by, e.g. hp or ac
    #[arg(long)]
    stat: Option<String>,
    #[arg(long)]
    orderby: Option<String>,
    /// ASC or DESC
    #[arg(long)]
    direction: Option<String>,
    /// Zero-based row offset
    #[arg(long, default_value_t = 0)]
    start: usize,
}

fn any(value: i64) -> Option<i64> {
    (value > -1).then_some(value)
}

impl Args {
    fn config(&self) -> Result<BazaarConfig> {
        let mut config = BazaarConfig::from_env()?;
        if let Some(url) = &self.trader_db {
            config.trader_database_url = url.clone();
            if self.content_db.is_none() {
                config.content_database_url = url.clone();
            }
        }
        if let Some(url) = &self.content_db {
            config.content_database_url = url.clone();
        }
        if let Some(per_page) = self.per_page {
            config.per_page = per_page;
        }
        config.validate()?;
        Ok(config)
    }

    fn request(&self) -> Result<SearchRequest> {
        let mut item = ItemFilter::new().with_name(self.item.clone());
        item.classes = any(self.class);
        item.races = any(self.race);
        item.slots = any(self.slot);
        item.item_type = any(self.item_type);

        Ok(SearchRequest {
            listing: ListingFilter::new()
                .with_seller(self.seller.clone())
                .with_price_tiers(self.pricemin, self.pricemax),
            item,
            stat: self
                .stat
                .as_deref()
                .filter(|s| *s != "-1")
                .map(Stat::parse)
                .transpose()?,
            order_by: self.orderby.clone(),
            direction: self
                .direction
                .as_deref()
                .map(str::parse::<Direction>)
                .transpose()?,
            offset: self.start,
        })
    }
}

fn render(page: &SearchPage) -> Result<String> {
    Ok(serde_json::to_string_pretty(page)?)
}

async fn run(args: Args) -> Result<()> {
    let config = args.config()?;
    let request = args.request()?;

    let trader = TraderDatabase::connect(&config.trader_database_url)
        .await
        .map_err(BazaarError::store(StoreKind::Trader))?;
    let content = ContentDatabase::connect(&config.content_database_url)
        .await
        .map_err(BazaarError::store(StoreKind::Content))?;

    let bazaar = Bazaar::new(trader, content, ItemEffects).with_config(&config);
    let page = bazaar.search(&request).await?;

    println!("{}", render(&page)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
