//! Query-URL assembly for the stats site.

use chrono::{Duration, Local, NaiveDate};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::models::{Category, DateRange};

/// Resolve a date-range filter to concrete start/end strings. Named windows
/// are computed relative to `today`; explicit dates pass through verbatim.
pub(crate) fn resolve_range(range: &DateRange, today: NaiveDate) -> (String, String) {
    match range {
        DateRange::Window(w) => {
            let start = today - Duration::days(w.days());
            (start.to_string(), today.to_string())
        }
        DateRange::Span { start, end } => (start.clone(), end.clone()),
        DateRange::Single(date) => (date.clone(), date.clone()),
    }
}

/// Build the query URL for one page fetch. Filters equal to `"all"` omit
/// their query parameter; anything else is appended verbatim. Dates are not
/// validated here: a malformed date flows into the URL untouched and the
/// extraction fails downstream on the unexpected markup.
pub fn build_link(
    base: &str,
    category: &Category,
    range: &DateRange,
    map_filter: &str,
    ranking: &str,
) -> Result<Url> {
    build_link_at(
        base,
        category,
        range,
        map_filter,
        ranking,
        Local::now().date_naive(),
    )
}

pub(crate) fn build_link_at(
    base: &str,
    category: &Category,
    range: &DateRange,
    map_filter: &str,
    ranking: &str,
    today: NaiveDate,
) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/{}",
        base.trim_end_matches('/'),
        category.path()
    ))
    .map_err(|e| ScrapeError::Malformed {
        context: "base url",
        value: e.to_string(),
    })?;

    let (start, end) = resolve_range(range, today);
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("startDate", &start);
        query.append_pair("endDate", &end);
        if map_filter != "all" {
            query.append_pair("maps", map_filter);
        }
        if ranking != "all" {
            query.append_pair("rankingFilter", ranking);
        }
    }
    Ok(url)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Window;

    const BASE: &str = "https://www.hltv.org/stats";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
    }

    #[test]
    fn named_windows_span_their_nominal_length() {
        for (window, days) in [
            (Window::OneMonth, 31),
            (Window::ThreeMonths, 92),
            (Window::SixMonths, 183),
            (Window::TwelveMonths, 365),
        ] {
            let (start, end) = resolve_range(&DateRange::Window(window), today());
            let start: NaiveDate = start.parse().unwrap();
            let end: NaiveDate = end.parse().unwrap();
            assert_eq!(end, today());
            assert_eq!((end - start).num_days(), days);
        }
    }

    #[test]
    fn explicit_pair_passes_through_verbatim() {
        let url = build_link_at(
            BASE,
            &Category::Teams(None),
            &DateRange::Span {
                start: "2022-01-01".to_string(),
                end: "2022-02-01".to_string(),
            },
            "all",
            "all",
            today(),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.hltv.org/stats/teams?startDate=2022-01-01&endDate=2022-02-01"
        );
    }

    #[test]
    fn single_date_is_used_as_both_ends() {
        let url = build_link_at(
            BASE,
            &Category::Players(None),
            &DateRange::Single("2022-03-04".to_string()),
            "all",
            "all",
            today(),
        )
        .unwrap();
        assert!(
            url.query()
                .unwrap()
                .contains("startDate=2022-03-04&endDate=2022-03-04")
        );
    }

    #[test]
    fn all_filters_omit_their_fragments() {
        let url = build_link_at(
            BASE,
            &Category::Matches,
            &DateRange::Window(Window::OneMonth),
            "all",
            "all",
            today(),
        )
        .unwrap();
        let query = url.query().unwrap();
        assert!(!query.contains("maps="));
        assert!(!query.contains("rankingFilter="));
    }

    #[test]
    fn literal_filters_appear_verbatim() {
        let url = build_link_at(
            BASE,
            &Category::Matches,
            &DateRange::Window(Window::OneMonth),
            "de_dust2",
            "Top30",
            today(),
        )
        .unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("maps=de_dust2"));
        assert!(query.contains("rankingFilter=Top30"));
    }

    #[test]
    fn malformed_date_flows_into_the_url() {
        let url = build_link_at(
            BASE,
            &Category::Teams(None),
            &DateRange::Single("not-a-date".to_string()),
            "all",
            "all",
            today(),
        )
        .unwrap();
        assert!(url.query().unwrap().contains("startDate=not-a-date"));
    }
}
