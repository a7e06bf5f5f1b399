pub mod browser;
pub mod cleaner;
mod extract;
pub mod link;
pub mod throttle;

use tracing::{debug, info};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::models::{Category, DateRange, StatsTable};

use self::browser::PageFetcher;
use self::extract::PAGE_SIZE;
use self::throttle::Throttle;

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Routes a category to its extractor: builds the query URL, fetches the
/// page through the caller-supplied fetcher, and parses the variant's table.
/// One instance reuses one fetcher handle for every request, strictly
/// sequentially.
pub struct Scraper<F: PageFetcher> {
    fetcher: F,
    throttle: Throttle,
    base_url: String,
}

impl<F: PageFetcher> Scraper<F> {
    pub fn new(fetcher: F, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            throttle: Throttle::from_millis(config.page_delay_ms, config.page_jitter_ms),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Replace the pagination throttle (tests use [`Throttle::none`]).
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Scrape one category once. `category` accepts `"top"` or `"top/sub"`
    /// spellings, case-insensitively; the map filter is lower-cased before
    /// URL assembly, and a filter value of `"all"` means no filter.
    pub async fn scrape(
        &self,
        category: &str,
        range: &DateRange,
        map_filter: &str,
        ranking: &str,
    ) -> Result<StatsTable> {
        let category = Category::parse(category)?;
        let map_filter = map_filter.to_lowercase();

        let url = link::build_link(&self.base_url, &category, range, &map_filter, ranking)?;
        info!("fetching {} ({})", category, url);
        let html = self.fetcher.fetch(&url).await?;

        match category {
            Category::Players(None) => extract::player_overview(&html),
            Category::Players(Some(stat)) => extract::from_spec(&html, stat.table()),
            Category::Teams(None) => extract::from_spec(&html, &extract::TEAM_OVERVIEW),
            Category::Teams(Some(stat)) => extract::from_spec(&html, stat.table()),
            Category::Matches => self.paginate_matches(&html, url).await,
        }
    }

    /// The match listing is served 50 rows at a time. The displayed total
    /// determines how many extra pages exist; each one is re-fetched with an
    /// `offset` parameter, with a throttle pause before every fetch.
    async fn paginate_matches(&self, first_page: &str, url: Url) -> Result<StatsTable> {
        let total = extract::pagination_total(first_page)?;
        let pages = total.div_ceil(PAGE_SIZE);
        debug!("match listing: {} entries over {} pages", total, pages);

        let mut table = extract::from_spec(first_page, &extract::MATCHES)?;

        for page in 1..pages {
            self.throttle.pause().await;
            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("offset", &(page * PAGE_SIZE).to_string());
            debug!("fetching match page at offset {}", page * PAGE_SIZE);
            let html = self.fetcher.fetch(&page_url).await?;
            table.append(extract::from_spec(&html, &extract::MATCHES)?);
        }
        Ok(table)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
