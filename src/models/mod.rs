use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

// ── Categories ────────────────────────────────────────────────────────────────

/// Player statistics sub-pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStat {
    Flashbangs,
    OpeningKills,
    Pistols,
}

/// Team statistics sub-pages. `Ftu` is the full team statistics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamStat {
    Ftu,
    Pistols,
}

/// A section of the stats site, optionally narrowed to a sub-page.
/// Parsed from strings like `"players"`, `"Teams/FTU"`, `"matches"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Players(Option<PlayerStat>),
    Teams(Option<TeamStat>),
    Matches,
}

impl Category {
    /// Case-insensitive parse of `"top"` or `"top/sub"`. Unknown values are
    /// reported as `Unsupported` so callers can branch on them.
    pub fn parse(input: &str) -> Result<Self> {
        let lower = input.trim().to_lowercase();
        let (top, sub) = match lower.split_once('/') {
            Some((top, sub)) => (top, Some(sub)),
            None => (lower.as_str(), None),
        };
        let sub = sub.map(str::trim).filter(|s| !s.is_empty());

        match top {
            "players" => match sub {
                None => Ok(Self::Players(None)),
                Some("flashbangs") => Ok(Self::Players(Some(PlayerStat::Flashbangs))),
                Some("openingkills") => Ok(Self::Players(Some(PlayerStat::OpeningKills))),
                Some("pistols") => Ok(Self::Players(Some(PlayerStat::Pistols))),
                Some(other) => Err(ScrapeError::Unsupported {
                    kind: "player sub-category",
                    value: other.to_string(),
                }),
            },
            "teams" => match sub {
                None => Ok(Self::Teams(None)),
                Some("ftu") => Ok(Self::Teams(Some(TeamStat::Ftu))),
                Some("pistols") => Ok(Self::Teams(Some(TeamStat::Pistols))),
                Some(other) => Err(ScrapeError::Unsupported {
                    kind: "team sub-category",
                    value: other.to_string(),
                }),
            },
            "matches" => match sub {
                None => Ok(Self::Matches),
                Some(other) => Err(ScrapeError::Unsupported {
                    kind: "match sub-category",
                    value: other.to_string(),
                }),
            },
            other => Err(ScrapeError::Unsupported {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }

    /// URL path segment under the stats root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Players(None) => "players",
            Self::Players(Some(PlayerStat::Flashbangs)) => "players/flashbangs",
            Self::Players(Some(PlayerStat::OpeningKills)) => "players/openingkills",
            Self::Players(Some(PlayerStat::Pistols)) => "players/pistols",
            Self::Teams(None) => "teams",
            Self::Teams(Some(TeamStat::Ftu)) => "teams/ftu",
            Self::Teams(Some(TeamStat::Pistols)) => "teams/pistols",
            Self::Matches => "matches",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ── Date ranges ───────────────────────────────────────────────────────────────

/// Named rolling windows ending at "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Window {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Some(Self::OneMonth),
            "3m" => Some(Self::ThreeMonths),
            "6m" => Some(Self::SixMonths),
            "12m" => Some(Self::TwelveMonths),
            _ => None,
        }
    }

    /// Nominal window length in days.
    pub fn days(self) -> i64 {
        match self {
            Self::OneMonth => 31,
            Self::ThreeMonths => 92,
            Self::SixMonths => 183,
            Self::TwelveMonths => 365,
        }
    }
}

/// A date-range filter: a named rolling window, a single explicit date, or
/// an explicit start/end pair. Explicit dates are passed through to the URL
/// verbatim, with no validation; malformed input simply produces a query the
/// site will not recognize, and extraction fails downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    Window(Window),
    Single(String),
    Span { start: String, end: String },
}

impl DateRange {
    /// Parse a CLI-style range: a window name, `start:end`, or a bare date.
    pub fn parse(input: &str) -> Self {
        if let Some(w) = Window::parse(input) {
            return Self::Window(w);
        }
        if let Some((start, end)) = input.split_once(':') {
            return Self::Span {
                start: start.to_string(),
                end: end.to_string(),
            };
        }
        Self::Single(input.to_string())
    }
}

// ── Result table ──────────────────────────────────────────────────────────────

/// One extracted row: an optional label (player name, team name, or anchor
/// date) plus one raw text value per data column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub label: Option<String>,
    pub values: Vec<String>,
}

/// An ordered collection of rows sharing named columns, with an optional
/// designated label column. All values are raw extracted text; no numeric
/// coercion happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTable {
    pub label_column: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl StatsTable {
    pub fn new(label_column: Option<&str>, columns: &[&str]) -> Self {
        Self {
            label_column: label_column.map(str::to_string),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// A table with no schema yet; the first `append` adopts the batch's
    /// columns.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, label: Option<String>, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push(Row { label, values });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the label column: the previous label column (if any) is
    /// demoted to a leading data column, and every row is labelled `label`
    /// under the column name `name`. Relabelling an empty table yields an
    /// empty table with the adjusted schema.
    pub fn relabel(mut self, name: &str, label: &str) -> Self {
        if let Some(old) = self.label_column.take() {
            self.columns.insert(0, old);
            for row in &mut self.rows {
                row.values.insert(0, row.label.take().unwrap_or_default());
            }
        }
        self.label_column = Some(name.to_string());
        for row in &mut self.rows {
            row.label = Some(label.to_string());
        }
        self
    }

    /// Append another batch with the same schema. An empty receiver adopts
    /// the batch's schema.
    pub fn append(&mut self, other: StatsTable) {
        if self.columns.is_empty() && self.label_column.is_none() {
            self.label_column = other.label_column;
            self.columns = other.columns;
        } else {
            debug_assert_eq!(self.columns, other.columns);
            debug_assert_eq!(self.label_column, other.label_column);
        }
        self.rows.extend(other.rows);
    }

    /// Row labels in table order, for callers that key on the label column.
    pub fn labels(&self) -> impl Iterator<Item = Option<&str>> {
        self.rows.iter().map(|r| r.label.as_deref())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(
            Category::parse("Players/Flashbangs").unwrap(),
            Category::Players(Some(PlayerStat::Flashbangs))
        );
        assert_eq!(Category::parse("TEAMS").unwrap(), Category::Teams(None));
        assert_eq!(Category::parse("matches").unwrap(), Category::Matches);
    }

    #[test]
    fn unknown_subcategory_is_unsupported() {
        let err = Category::parse("players/grenades").unwrap_err();
        assert!(err.is_unsupported());
        let err = Category::parse("teams/economy").unwrap_err();
        assert!(err.is_unsupported());
        let err = Category::parse("events").unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn date_range_parse_variants() {
        assert_eq!(DateRange::parse("3M"), DateRange::Window(Window::ThreeMonths));
        assert_eq!(
            DateRange::parse("2023-01-01:2023-02-01"),
            DateRange::Span {
                start: "2023-01-01".to_string(),
                end: "2023-02-01".to_string(),
            }
        );
        assert_eq!(
            DateRange::parse("2023-01-01"),
            DateRange::Single("2023-01-01".to_string())
        );
    }

    #[test]
    fn relabel_demotes_old_label_to_leading_column() {
        let mut table = StatsTable::new(Some("Player"), &["Rating"]);
        table.push_row(Some("s1mple".to_string()), vec!["1.30".to_string()]);

        let table = table.relabel("Date", "2023-05-01");

        assert_eq!(table.label_column.as_deref(), Some("Date"));
        assert_eq!(table.columns, vec!["Player", "Rating"]);
        assert_eq!(table.rows[0].label.as_deref(), Some("2023-05-01"));
        assert_eq!(table.rows[0].values, vec!["s1mple", "1.30"]);
    }

    #[test]
    fn relabel_empty_table_is_empty() {
        let table = StatsTable::new(Some("Player"), &["Rating"]);
        let table = table.relabel("Date", "2023-05-01");
        assert!(table.is_empty());
        assert_eq!(table.label_column.as_deref(), Some("Date"));
    }

    #[test]
    fn append_adopts_schema_of_first_batch() {
        let mut combined = StatsTable::empty();
        let mut batch = StatsTable::new(Some("Team"), &["Rating"]);
        batch.push_row(Some("NAVI".to_string()), vec!["1.10".to_string()]);
        combined.append(batch);

        assert_eq!(combined.label_column.as_deref(), Some("Team"));
        assert_eq!(combined.len(), 1);
    }
}
