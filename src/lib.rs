//! Scraper for the HLTV statistics pages: drives a caller-supplied browser
//! session, parses the rendered tables, and returns in-memory tables keyed
//! by date ranges and filters.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod scraper;
pub mod utils;

pub use self::error::{Result, ScrapeError};
pub use self::models::{Category, DateRange, StatsTable, Window};
pub use self::scraper::browser::{BrowserFetcher, PageFetcher};
pub use self::scraper::throttle::Throttle;
pub use self::scraper::Scraper;
