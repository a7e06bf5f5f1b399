//! Table export: CSV and JSON renderings of a scraped table.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::StatsTable;

/// Write the table as CSV, label column first when present.
pub fn write_csv<W: Write>(table: &StatsTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = Vec::with_capacity(table.columns.len() + 1);
    if let Some(label) = &table.label_column {
        header.push(label);
    }
    header.extend(table.columns.iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record: Vec<&str> = Vec::with_capacity(header.len());
        if table.label_column.is_some() {
            record.push(row.label.as_deref().unwrap_or_default());
        }
        record.extend(row.values.iter().map(String::as_str));
        writer.write_record(&record)?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    debug!("wrote {} CSV rows", table.rows.len());
    Ok(())
}

/// Render the table as a JSON array with one object per row.
pub fn to_json(table: &StatsTable) -> Value {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            if let Some(label) = &table.label_column {
                object.insert(
                    label.clone(),
                    Value::String(row.label.clone().unwrap_or_default()),
                );
            }
            for (column, value) in table.columns.iter().zip(&row.values) {
                object.insert(column.clone(), Value::String(value.clone()));
            }
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

pub fn write_json<W: Write>(table: &StatsTable, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, &to_json(table))
        .context("Failed to serialize table as JSON")?;
    out.write_all(b"\n")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatsTable {
        let mut table = StatsTable::new(Some("Team"), &["Map Count", "Rating"]);
        table.push_row(
            Some("NAVI".to_string()),
            vec!["34".to_string(), "1.12".to_string()],
        );
        table.push_row(
            Some("G2".to_string()),
            vec!["28".to_string(), "1.03".to_string()],
        );
        table
    }

    #[test]
    fn csv_has_label_column_first() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Team,Map Count,Rating"));
        assert_eq!(lines.next(), Some("NAVI,34,1.12"));
        assert_eq!(lines.next(), Some("G2,28,1.03"));
    }

    #[test]
    fn csv_without_label_column() {
        let mut table = StatsTable::new(None, &["Date", "Event"]);
        table.push_row(
            None,
            vec!["14/6/23".to_string(), "IEM Cologne".to_string()],
        );
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("Date,Event"));
    }

    #[test]
    fn json_rows_carry_label_and_columns() {
        let json = to_json(&sample());
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Team"], "NAVI");
        assert_eq!(rows[0]["Rating"], "1.12");
        assert_eq!(rows[1]["Map Count"], "28");
    }
}
