//! Windowed scrape orchestrator: repeats the dispatch once per day across a
//! rolling window and stitches the per-day batches into one table.
//!
//! Each day's scrape covers the explicit pair `[anchor - width, anchor]`;
//! the batch is relabelled with its anchor date (the original identity
//! column is demoted to a leading data column) and appended oldest-first.
//! Per-day batches that come back empty contribute no rows.

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, info};

use crate::error::{Result, ScrapeError};
use crate::models::{DateRange, StatsTable, Window};
use crate::scraper::browser::PageFetcher;
use crate::scraper::throttle::Throttle;
use crate::scraper::Scraper;

pub const DEFAULT_WIDTH_DAYS: i64 = 30;

/// Scrape `category` once per day across the named rolling window, where
/// each day's request covers `[anchor - width_days, anchor]`. Waits on
/// `throttle` after every per-day scrape. Returns the combined table with
/// the anchor date as label column, oldest anchor first. Unknown window
/// names are `Unsupported`.
pub async fn scrape_range<F: PageFetcher>(
    scraper: &Scraper<F>,
    category: &str,
    window: &str,
    map_filter: &str,
    ranking: &str,
    width_days: i64,
    throttle: &Throttle,
) -> Result<StatsTable> {
    let window = Window::parse(window).ok_or_else(|| ScrapeError::Unsupported {
        kind: "rolling window",
        value: window.to_string(),
    })?;
    scrape_range_from(
        scraper,
        category,
        window,
        map_filter,
        ranking,
        width_days,
        throttle,
        Local::now().date_naive(),
    )
    .await
}

#[allow(clippy::too_many_arguments)]
async fn scrape_range_from<F: PageFetcher>(
    scraper: &Scraper<F>,
    category: &str,
    window: Window,
    map_filter: &str,
    ranking: &str,
    width_days: i64,
    throttle: &Throttle,
    today: NaiveDate,
) -> Result<StatsTable> {
    let days = window.days();
    info!(
        "windowed scrape: {} over {} days, {}-day windows",
        category,
        days - 1,
        width_days
    );

    let mut combined = StatsTable::empty();

    // Anchors run from the oldest day in the window up to yesterday, one
    // scrape per day.
    for offset in (1..days).rev() {
        let anchor = today - Duration::days(offset);
        let start = anchor - Duration::days(width_days);
        let range = DateRange::Span {
            start: start.to_string(),
            end: anchor.to_string(),
        };

        let batch = scraper.scrape(category, &range, map_filter, ranking).await?;
        throttle.pause().await;

        if batch.is_empty() {
            debug!("{}: empty batch for {}", category, anchor);
        }
        combined.append(batch.relabel("Date", &anchor.to_string()));
    }

    info!("windowed scrape done: {} rows", combined.len());
    Ok(combined)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use url::Url;

    use super::*;
    use crate::config::ScraperConfig;

    struct FixedPage(&'static str);

    #[async_trait]
    impl PageFetcher for FixedPage {
        async fn fetch(&self, _url: &Url) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    const TEAM_PAGE: &str = r#"
    <table class="stats-table player-ratings-table"><tbody>
      <tr><td>NAVI</td><td>34</td><td>+212</td><td>1.08</td><td>1.12</td></tr>
      <tr><td>FaZe</td><td>31</td><td>+118</td><td>1.04</td><td>1.07</td></tr>
    </tbody></table>"#;

    const EMPTY_TEAM_PAGE: &str = r#"
    <table class="stats-table player-ratings-table"><tbody></tbody></table>"#;

    fn test_scraper(page: &'static str) -> Scraper<FixedPage> {
        let config = ScraperConfig {
            base_url: "https://stats.example".to_string(),
            headless: true,
            page_delay_ms: 0,
            page_jitter_ms: 0,
        };
        Scraper::new(FixedPage(page), &config).with_throttle(Throttle::none())
    }

    #[tokio::test]
    async fn anchors_cover_the_window_in_chronological_order() {
        let scraper = test_scraper(TEAM_PAGE);
        let today = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let table = scrape_range_from(
            &scraper,
            "teams",
            Window::OneMonth,
            "all",
            "all",
            DEFAULT_WIDTH_DAYS,
            &Throttle::none(),
            today,
        )
        .await
        .unwrap();

        assert_eq!(table.label_column.as_deref(), Some("Date"));
        assert_eq!(table.columns, vec!["Team", "Map Count", "K/D Diff.", "K/D", "Rating"]);

        // One anchor per day: today-30 .. today-1, oldest first, two rows each.
        let mut anchors: Vec<String> = table
            .labels()
            .flatten()
            .map(str::to_string)
            .collect();
        assert_eq!(anchors.len(), 30 * 2);
        anchors.dedup();
        assert_eq!(anchors.len(), 30);
        assert_eq!(anchors.first().map(String::as_str), Some("2023-05-16"));
        assert_eq!(anchors.last().map(String::as_str), Some("2023-06-14"));
        let mut sorted = anchors.clone();
        sorted.sort();
        assert_eq!(anchors, sorted);
    }

    #[tokio::test]
    async fn empty_daily_batches_contribute_no_rows() {
        let scraper = test_scraper(EMPTY_TEAM_PAGE);
        let today = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let table = scrape_range_from(
            &scraper,
            "teams",
            Window::OneMonth,
            "all",
            "all",
            DEFAULT_WIDTH_DAYS,
            &Throttle::none(),
            today,
        )
        .await
        .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.label_column.as_deref(), Some("Date"));
    }

    #[tokio::test]
    async fn unknown_window_is_unsupported() {
        let scraper = test_scraper(TEAM_PAGE);
        let err = scrape_range(
            &scraper,
            "teams",
            "2w",
            "all",
            "all",
            DEFAULT_WIDTH_DAYS,
            &Throttle::none(),
        )
        .await
        .unwrap_err();
        assert!(err.is_unsupported());
    }
}
