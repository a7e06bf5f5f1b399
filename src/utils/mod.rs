use std::time::Instant;

use tracing::info;

use crate::models::StatsTable;

/// Logs the wall-clock duration of a scrape when dropped.
pub struct Stopwatch {
    label: String,
    start: Instant,
}

impl Stopwatch {
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        info!("{} finished in {:.2?}", self.label, self.start.elapsed());
    }
}

/// One-line shape summary of a result table, for logging.
pub fn table_summary(table: &StatsTable) -> String {
    let columns = table.columns.len() + usize::from(table.label_column.is_some());
    format!("{} rows × {} columns", table.len(), columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_summary() {
        let mut table = StatsTable::new(Some("Team"), &["Rating"]);
        table.push_row(Some("NAVI".to_string()), vec!["1.12".to_string()]);
        assert_eq!(table_summary(&table), "1 rows × 2 columns");

        let empty = StatsTable::new(None, &["Date", "Event"]);
        assert_eq!(table_summary(&empty), "0 rows × 2 columns");
    }
}
