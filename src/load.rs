//! Materializes listing exports into tables and persists finished tables.
//!
//! The loader is the pipeline's only producer: it validates that the eleven
//! raw listing columns are present (extra columns are ignored), normalizes
//! placeholder tokens to missing, and parses the numeric columns with row
//! context on failure. The writer is the only consumer.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::debug;

use crate::{
    data::{Column, Table, col},
    io_utils,
};

/// Raw columns a listing export must provide, in table order.
pub const RAW_COLUMNS: &[&str] = &[
    col::BRAND,
    col::MODEL,
    col::MODEL_YEAR,
    col::MILAGE,
    col::FUEL_TYPE,
    col::ENGINE,
    col::TRANSMISSION,
    col::EXT_COL,
    col::INT_COL,
    col::ACCIDENT,
    col::CLEAN_TITLE,
];

const NUMERIC_RAW_COLUMNS: &[&str] = &[col::MODEL_YEAR, col::MILAGE];

/// Placeholder tokens exports use for absent values.
const MISSING_TOKENS: &[&str] = &["", "-", "–", "na", "n/a", "null"];

fn is_missing_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

fn parse_numeric(raw: &str) -> Result<Option<f64>> {
    if is_missing_token(raw) {
        return Ok(None);
    }
    let cleaned = raw.trim().replace(',', "");
    let value: f64 = cleaned
        .parse()
        .with_context(|| format!("Failed to parse '{raw}' as a number"))?;
    Ok(value.is_finite().then_some(value))
}

pub fn read_listing_table(path: &Path, delimiter: u8, limit: Option<usize>) -> Result<Table> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = reader
        .headers()
        .with_context(|| format!("Reading headers from {path:?}"))?
        .clone();

    let mut indices = Vec::with_capacity(RAW_COLUMNS.len());
    for name in RAW_COLUMNS {
        let index = headers
            .iter()
            .position(|header| header.trim() == *name)
            .ok_or_else(|| anyhow!("Input {path:?} is missing required column '{name}'"))?;
        indices.push(index);
    }

    let mut built: Vec<Column> = RAW_COLUMNS
        .iter()
        .map(|name| {
            if NUMERIC_RAW_COLUMNS.contains(name) {
                Column::Float(Vec::new())
            } else {
                Column::Text(Vec::new())
            }
        })
        .collect();

    for (row_index, record) in reader.records().enumerate() {
        if let Some(limit) = limit
            && row_index >= limit
        {
            break;
        }
        let record = record.with_context(|| format!("Reading row {}", row_index + 2))?;
        for (slot, column_index) in indices.iter().enumerate() {
            let raw = record.get(*column_index).unwrap_or("");
            match &mut built[slot] {
                Column::Float(values) => {
                    let parsed = parse_numeric(raw).with_context(|| {
                        format!("Row {} column '{}'", row_index + 2, RAW_COLUMNS[slot])
                    })?;
                    values.push(parsed);
                }
                Column::Text(values) => {
                    values.push(if is_missing_token(raw) {
                        None
                    } else {
                        Some(raw.trim().to_string())
                    });
                }
            }
        }
    }

    let mut listings = Table::new();
    for (name, column) in RAW_COLUMNS.iter().zip(built) {
        listings.insert(name, column)?;
    }
    debug!("Loaded {} listing row(s) from {path:?}", listings.row_count());
    Ok(listings)
}

pub fn write_table(table: &Table, path: Option<&Path>, delimiter: u8) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, delimiter)?;
    writer
        .write_record(table.names())
        .context("Writing header row")?;
    for row in 0..table.row_count() {
        writer
            .write_record(table.row_display(row))
            .with_context(|| format!("Writing row {}", row + 2))?;
    }
    writer.flush().context("Flushing CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_tokens_map_to_missing() {
        for token in ["", "  ", "-", "–", "NA", "n/a", "NULL"] {
            assert!(is_missing_token(token), "token {token:?}");
        }
        assert!(!is_missing_token("Gasoline"));
        assert!(!is_missing_token("0"));
    }

    #[test]
    fn numeric_parsing_strips_thousands_separators() {
        assert_eq!(parse_numeric("51,000").unwrap(), Some(51000.0));
        assert_eq!(parse_numeric(" 2016 ").unwrap(), Some(2016.0));
        assert_eq!(parse_numeric("-").unwrap(), None);
        assert!(parse_numeric("many").is_err());
    }

    #[test]
    fn non_finite_literals_are_treated_as_missing() {
        assert_eq!(parse_numeric("NaN").unwrap(), None);
        assert_eq!(parse_numeric("inf").unwrap(), None);
    }
}
