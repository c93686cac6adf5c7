//! Summary primitives (mean/median/mode) shared with the imputer, plus the
//! `stats` subcommand over the finished feature table.

use anyhow::Result;
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::{
    cli::StatsArgs,
    data::{Column, Table},
    frequency, io_utils, load,
    pipeline::{self, PipelineOptions},
    table,
};

/// Mean over non-missing values; `None` for an all-missing column.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

/// Median over non-missing values; even-sized sets average the two middles.
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.total_cmp(b));
    let mid = present.len() / 2;
    if present.len().is_multiple_of(2) {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Most frequent value; ties break to the smallest value so the result does
/// not depend on hash-map iteration order.
pub fn mode_float(values: &[Option<f64>]) -> Option<f64> {
    values
        .iter()
        .flatten()
        .map(|value| value.to_bits())
        .counts()
        .into_iter()
        .max_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| f64::from_bits(b.0).total_cmp(&f64::from_bits(a.0)))
        })
        .map(|(bits, _)| f64::from_bits(bits))
}

/// Most frequent label; ties break lexicographically smallest.
pub fn mode_text(values: &[Option<String>]) -> Option<String> {
    values
        .iter()
        .flatten()
        .counts()
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(value, _)| value.clone())
}

/// Sample standard deviation; `None` below two observations.
pub fn std_dev(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.len() < 2 {
        return None;
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    let variance = present
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (present.len() as f64 - 1.0);
    Some(variance.sqrt())
}

#[derive(Debug, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

pub fn summarize_column(name: &str, values: &[Option<f64>]) -> ColumnSummary {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    ColumnSummary {
        column: name.to_string(),
        count: present.len(),
        min: present.iter().copied().reduce(f64::min),
        max: present.iter().copied().reduce(f64::max),
        mean: mean(values),
        median: median(values),
        std_dev: std_dev(values),
    }
}

/// Summaries for every numeric column, in table order.
pub fn summarize_table(table: &Table) -> Vec<ColumnSummary> {
    table
        .iter()
        .filter_map(|(name, column)| match column {
            Column::Float(values) => Some(summarize_column(name, values)),
            Column::Text(_) => None,
        })
        .collect()
}

pub fn execute(args: &StatsArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let mut listings = load::read_listing_table(&args.input, delimiter, args.limit)?;
    let options = args.as_of_year.map(PipelineOptions::as_of).unwrap_or_default();
    pipeline::run(&mut listings, &options)?;

    if args.frequency {
        let rows = frequency::compute_frequency_rows(&listings, args.top);
        table::print_table(&["column", "value", "count", "percent"], &rows);
        info!("Computed frequency counts for {} row(s)", listings.row_count());
        return Ok(());
    }

    let summaries = summarize_table(&listings);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        let rows: Vec<Vec<String>> = summaries
            .iter()
            .map(|summary| {
                vec![
                    summary.column.clone(),
                    summary.count.to_string(),
                    format_metric(summary.min),
                    format_metric(summary.max),
                    format_metric(summary.mean),
                    format_metric(summary.median),
                    format_metric(summary.std_dev),
                ]
            })
            .collect();
        table::print_table(
            &["column", "count", "min", "max", "mean", "median", "std_dev"],
            &rows,
        );
    }
    info!("Computed summary statistics for {} column(s)", summaries.len());
    Ok(())
}

fn format_metric(metric: Option<f64>) -> String {
    match metric {
        Some(value) if value.fract() == 0.0 => format!("{value:.0}"),
        Some(value) => format!("{value:.4}"),
        None => String::new(),
    }
}
