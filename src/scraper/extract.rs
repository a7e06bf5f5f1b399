//! Table extraction: one declarative column specification per page variant,
//! driven through a single traversal routine. Only the player-overview page
//! (multi-roster row expansion) keeps a bespoke walk.

use scraper::{CaseSensitivity, ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::models::{PlayerStat, StatsTable, TeamStat};

use super::cleaner::{clean_score, tidy_text, trailing_count};

/// Rows served per match-listing page.
pub(crate) const PAGE_SIZE: usize = 50;

// ── Declarative column specs ──────────────────────────────────────────────────

/// How to locate one cell's value within a `<tr>`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CellRef {
    /// nth `<td>` of the row.
    Index(usize),
    /// The `<td>` carrying this class.
    Class(&'static str),
    /// First match of a CSS selector evaluated within the row; inner text.
    Select(&'static str),
    /// nth match of a CSS selector within the row; inner text.
    SelectNth {
        selector: &'static str,
        index: usize,
    },
    /// nth match of a CSS selector within the row; an attribute value.
    SelectAttr {
        selector: &'static str,
        index: usize,
        attr: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnSpec {
    pub name: &'static str,
    pub cell: CellRef,
    pub clean: Option<fn(&str) -> String>,
}

impl ColumnSpec {
    const fn indexed(name: &'static str, index: usize) -> Self {
        Self {
            name,
            cell: CellRef::Index(index),
            clean: None,
        }
    }
}

/// One page variant: the structural marker of its table, the identity column
/// used as row label (absent for the match listing), and the data columns.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableSpec {
    pub marker: &'static str,
    pub label: Option<ColumnSpec>,
    pub columns: &'static [ColumnSpec],
}

const PLAYER_RATINGS_TABLE: &str = "table.stats-table.player-ratings-table";
// The ftu and team-pistols tables carry overlapping class lists, so these
// two are keyed on the exact class attribute value.
const TEAM_FTU_TABLE: &str =
    r#"table[class="stats-table player-ratings-table ftu gtSmartphone-only"]"#;
const TEAM_PISTOLS_TABLE: &str = r#"table[class="stats-table player-ratings-table ftu"]"#;
const MATCHES_TABLE: &str = "table.stats-table.matches-table.no-sort";

pub(crate) const PLAYER_FLASHBANGS: TableSpec = TableSpec {
    marker: PLAYER_RATINGS_TABLE,
    label: Some(ColumnSpec::indexed("Player", 0)),
    columns: &[
        ColumnSpec::indexed("Thrown", 2),
        ColumnSpec::indexed("Blinded", 3),
        ColumnSpec::indexed("Opp. Flashes", 4),
        ColumnSpec::indexed("Flash Diff.", 5),
        ColumnSpec::indexed("Flash Assist Rate", 6),
        ColumnSpec::indexed("Flash Success Rate", 7),
    ],
};

pub(crate) const PLAYER_OPENING_KILLS: TableSpec = TableSpec {
    marker: PLAYER_RATINGS_TABLE,
    label: Some(ColumnSpec::indexed("Player", 0)),
    columns: &[
        ColumnSpec::indexed("Opening KPR", 2),
        ColumnSpec::indexed("Opening DPR", 3),
        ColumnSpec::indexed("Opening Attempts", 4),
        ColumnSpec::indexed("Opening Success Rate", 5),
        ColumnSpec::indexed("Opening Kill Rating (2)", 6),
    ],
};

pub(crate) const PLAYER_PISTOLS: TableSpec = TableSpec {
    marker: PLAYER_RATINGS_TABLE,
    label: Some(ColumnSpec::indexed("Player", 0)),
    columns: &[
        ColumnSpec::indexed("KD Diff.", 3),
        ColumnSpec::indexed("KD", 4),
        ColumnSpec::indexed("Pistol Rating (2)", 5),
    ],
};

pub(crate) const TEAM_OVERVIEW: TableSpec = TableSpec {
    marker: PLAYER_RATINGS_TABLE,
    label: Some(ColumnSpec::indexed("Team", 0)),
    columns: &[
        ColumnSpec::indexed("Map Count", 1),
        ColumnSpec::indexed("K/D Diff.", 2),
        ColumnSpec::indexed("K/D", 3),
        ColumnSpec::indexed("Rating", 4),
    ],
};

pub(crate) const TEAM_FTU: TableSpec = TableSpec {
    marker: TEAM_FTU_TABLE,
    label: Some(ColumnSpec {
        name: "Team",
        cell: CellRef::Class("factor-team"),
        clean: None,
    }),
    columns: &[
        ColumnSpec::indexed("Round Win Rate", 2),
        ColumnSpec::indexed("Opening Duel Wins", 3),
        ColumnSpec::indexed("Multikill Rate", 4),
        ColumnSpec::indexed("FiveVFour", 5),
        ColumnSpec::indexed("FourVFive", 6),
        ColumnSpec::indexed("Traded Players", 7),
        ColumnSpec::indexed("Util. Dam.", 8),
        ColumnSpec::indexed("Flash Assist", 9),
    ],
};

pub(crate) const TEAM_PISTOLS: TableSpec = TableSpec {
    marker: TEAM_PISTOLS_TABLE,
    label: Some(ColumnSpec::indexed("Team", 0)),
    columns: &[
        ColumnSpec::indexed("Won / Lost", 2),
        ColumnSpec::indexed("Pistol Win", 3),
        ColumnSpec::indexed("Round 2 Conversion", 4),
        ColumnSpec::indexed("Round 2 Break", 5),
    ],
};

pub(crate) const MATCHES: TableSpec = TableSpec {
    marker: MATCHES_TABLE,
    label: None,
    columns: &[
        ColumnSpec {
            name: "Date",
            cell: CellRef::Select("td.date-col a div"),
            clean: None,
        },
        ColumnSpec {
            name: "Team1",
            cell: CellRef::SelectNth {
                selector: "td.team-col a",
                index: 0,
            },
            clean: None,
        },
        ColumnSpec {
            name: "Team2",
            cell: CellRef::SelectNth {
                selector: "td.team-col a",
                index: 1,
            },
            clean: None,
        },
        ColumnSpec {
            name: "Team1_country",
            cell: CellRef::SelectAttr {
                selector: "td.team-col img",
                index: 0,
                attr: "alt",
            },
            clean: None,
        },
        ColumnSpec {
            name: "Team2_country",
            cell: CellRef::SelectAttr {
                selector: "td.team-col img",
                index: 1,
                attr: "alt",
            },
            clean: None,
        },
        ColumnSpec {
            name: "Map",
            cell: CellRef::Select("td.statsDetail div.dynamic-map-name-full"),
            clean: None,
        },
        ColumnSpec {
            name: "Team1_Score",
            cell: CellRef::SelectNth {
                selector: "td.team-col span",
                index: 0,
            },
            clean: Some(clean_score),
        },
        ColumnSpec {
            name: "Team2_Score",
            cell: CellRef::SelectNth {
                selector: "td.team-col span",
                index: 1,
            },
            clean: Some(clean_score),
        },
        ColumnSpec {
            name: "Event",
            cell: CellRef::Select("td.event-col a"),
            clean: None,
        },
    ],
};

impl PlayerStat {
    pub(crate) fn table(self) -> &'static TableSpec {
        match self {
            Self::Flashbangs => &PLAYER_FLASHBANGS,
            Self::OpeningKills => &PLAYER_OPENING_KILLS,
            Self::Pistols => &PLAYER_PISTOLS,
        }
    }
}

impl TeamStat {
    pub(crate) fn table(self) -> &'static TableSpec {
        match self {
            Self::Ftu => &TEAM_FTU,
            Self::Pistols => &TEAM_PISTOLS,
        }
    }
}

// ── Generic traversal ─────────────────────────────────────────────────────────

fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| ScrapeError::Selector(e.to_string()))
}

fn element_text(el: ElementRef) -> String {
    tidy_text(&el.text().collect::<String>())
}

fn read_cell(row: ElementRef, cells: &[ElementRef], col: &ColumnSpec) -> Result<String> {
    let missing = ScrapeError::ElementNotFound { context: col.name };
    let text = match col.cell {
        CellRef::Index(i) => cells.get(i).copied().map(element_text).ok_or(missing)?,
        CellRef::Class(class) => cells
            .iter()
            .find(|c| {
                c.value()
                    .has_class(class, CaseSensitivity::CaseSensitive)
            })
            .copied()
            .map(element_text)
            .ok_or(missing)?,
        CellRef::Select(sel) => row
            .select(&selector(sel)?)
            .next()
            .map(element_text)
            .ok_or(missing)?,
        CellRef::SelectNth { selector: sel, index } => row
            .select(&selector(sel)?)
            .nth(index)
            .map(element_text)
            .ok_or(missing)?,
        CellRef::SelectAttr {
            selector: sel,
            index,
            attr,
        } => row
            .select(&selector(sel)?)
            .nth(index)
            .and_then(|el| el.value().attr(attr))
            .map(|v| tidy_text(v))
            .ok_or(missing)?,
    };
    Ok(match col.clean {
        Some(clean) => clean(&text),
        None => text,
    })
}

/// Locate the spec's marker table and read every body row into a
/// [`StatsTable`]. A missing table or cell aborts the whole call; there is
/// no partial-result salvage.
pub(crate) fn from_spec(html: &str, spec: &TableSpec) -> Result<StatsTable> {
    let doc = Html::parse_document(html);
    let table_sel = selector(spec.marker)?;
    let table = doc
        .select(&table_sel)
        .next()
        .ok_or(ScrapeError::ElementNotFound {
            context: spec.marker,
        })?;

    let row_sel = selector("tbody tr")?;
    let cell_sel = selector("td")?;

    let column_names: Vec<&str> = spec.columns.iter().map(|c| c.name).collect();
    let mut out = StatsTable::new(spec.label.as_ref().map(|l| l.name), &column_names);

    for row in table.select(&row_sel) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        let label = spec
            .label
            .as_ref()
            .map(|l| read_cell(row, &cells, l))
            .transpose()?;
        let mut values = Vec::with_capacity(spec.columns.len());
        for col in spec.columns {
            values.push(read_cell(row, &cells, col)?);
        }
        out.push_row(label, values);
    }
    Ok(out)
}

// ── Player overview (bespoke: multi-roster expansion) ─────────────────────────

/// The player overview page lists one `<tr>` per player, but a player who
/// appeared on several rosters in the period carries extra team anchors in a
/// `span.gtSmartphone-only`. Each membership becomes its own record, sharing
/// the player's rating and K/D.
pub(crate) fn player_overview(html: &str) -> Result<StatsTable> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(&selector(PLAYER_RATINGS_TABLE)?)
        .next()
        .ok_or(ScrapeError::ElementNotFound {
            context: PLAYER_RATINGS_TABLE,
        })?;

    let row_sel = selector("tbody tr")?;
    let cell_sel = selector("td")?;
    let player_sel = selector("td.playerCol a")?;
    let team_cell_sel = selector("td.teamCol")?;
    let img_sel = selector("img")?;
    let rating_sel = selector("td.ratingCol")?;
    let extra_team_sel = selector("span.gtSmartphone-only a")?;

    let mut out = StatsTable::new(Some("Player"), &["Team", "Rating", "K/D"]);

    for row in table.select(&row_sel) {
        let player = row
            .select(&player_sel)
            .next()
            .map(element_text)
            .ok_or(ScrapeError::ElementNotFound {
                context: "td.playerCol a",
            })?;
        let team_cell = row
            .select(&team_cell_sel)
            .next()
            .ok_or(ScrapeError::ElementNotFound {
                context: "td.teamCol",
            })?;
        let rating = row
            .select(&rating_sel)
            .next()
            .map(element_text)
            .ok_or(ScrapeError::ElementNotFound {
                context: "td.ratingCol",
            })?;
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        let kd = cells
            .get(5)
            .copied()
            .map(element_text)
            .ok_or(ScrapeError::ElementNotFound { context: "K/D" })?;

        let primary_team = team_cell
            .select(&img_sel)
            .next()
            .and_then(|img| img.value().attr("alt").or_else(|| img.value().attr("title")))
            .map(|v| tidy_text(v))
            .unwrap_or_default();

        out.push_row(
            Some(player.clone()),
            vec![primary_team, rating.clone(), kd.clone()],
        );

        for extra in team_cell.select(&extra_team_sel) {
            let team = extra
                .select(&img_sel)
                .next()
                .and_then(|img| img.value().attr("alt").or_else(|| img.value().attr("title")))
                .map(|v| tidy_text(v))
                .unwrap_or_default();
            out.push_row(
                Some(player.clone()),
                vec![team, rating.clone(), kd.clone()],
            );
        }
    }
    Ok(out)
}

// ── Match listing pagination ──────────────────────────────────────────────────

/// Total entry count from the pagination summary element.
pub(crate) fn pagination_total(html: &str) -> Result<usize> {
    let doc = Html::parse_document(html);
    let span = doc
        .select(&selector("span.pagination-data")?)
        .next()
        .ok_or(ScrapeError::ElementNotFound {
            context: "span.pagination-data",
        })?;
    let text = element_text(span);
    trailing_count(&text).ok_or_else(|| ScrapeError::Malformed {
        context: "pagination summary",
        value: text,
    })
}
