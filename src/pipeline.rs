//! Stage ordering for the listing feature pipeline.
//!
//! The stages run in a fixed sequence over one exclusively-owned table:
//! extraction, fuel classification, bucketing, age features, accident
//! binarization, pruning of the raw source columns, imputation, mileage
//! interactions, and finally the completeness gate. The order is load-bearing
//! — imputation must see the pruned table, and the gearless-speed override
//! must run after transmission types are mode-filled.

use chrono::{Datelike, Utc};
use log::debug;
use thiserror::Error;

use crate::{
    classify,
    data::{Table, TableError, col},
    derive, extract, impute,
};

/// Raw source columns dropped once their derived features exist.
pub const PRUNED_COLUMNS: &[&str] = &[
    col::BRAND,
    col::MODEL,
    col::MODEL_YEAR,
    col::ENGINE,
    col::TRANSMISSION,
    col::EXT_COL,
    col::INT_COL,
    col::CLEAN_TITLE,
];

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Table(#[from] TableError),
    /// A rule table failed to cover some input value; extend coverage rather
    /// than catching this.
    #[error("completeness check failed: {count} missing value(s) remain ({details})")]
    MissingValues { count: usize, details: String },
    #[error("completeness check failed: {count} non-finite value(s) ({details})")]
    NonFinite { count: usize, details: String },
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Calendar year the age calculation is relative to.
    pub as_of_year: i32,
}

impl PipelineOptions {
    pub fn as_of(year: i32) -> Self {
        Self { as_of_year: year }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            as_of_year: Utc::now().year(),
        }
    }
}

/// Runs the full pipeline in place. On success every cell in `table` is
/// present and finite; on failure the table is left mid-transformation and
/// should be discarded.
pub fn run(table: &mut Table, options: &PipelineOptions) -> Result<(), PipelineError> {
    extract::engine_fields(table)?;
    classify::fill_fuel_type(table)?;
    extract::transmission_speed(table)?;
    classify::transmission_type(table)?;
    derive::age_features(table, options.as_of_year)?;
    classify::model_class(table)?;
    classify::brand_category(table)?;
    classify::exterior_color(table)?;
    classify::interior_color(table)?;
    derive::accident_flag(table)?;

    table.drop_columns(PRUNED_COLUMNS);
    debug!("Pruned {} raw column(s)", PRUNED_COLUMNS.len());

    impute::fill_mean(table, col::HORSE_POWER)?;
    impute::fill_mean(table, col::ENGINE_SIZE)?;
    impute::fill_mode_float(table, col::CYLINDER)?;
    impute::fill_mode_text(table, col::MODEL_CLASS)?;
    impute::fill_mode_text(table, col::TRANSMISSION_TYPE)?;
    impute::fill_mode_text(table, col::FUEL_TYPE)?;
    impute::fill_mode_text(table, col::BRAND_CAT)?;
    impute::normalize_transmission_speed(table)?;

    derive::mileage_age_interactions(table)?;
    check_complete(table)
}

/// Postcondition gate: zero missing and zero non-finite cells, or abort.
fn check_complete(table: &Table) -> Result<(), PipelineError> {
    let mut missing = 0usize;
    let mut missing_details = Vec::new();
    let mut non_finite = 0usize;
    let mut non_finite_details = Vec::new();
    for (name, column) in table.iter() {
        let gaps = column.missing_count();
        if gaps > 0 {
            missing += gaps;
            missing_details.push(format!("{name}: {gaps}"));
        }
        let bad = column.non_finite_count();
        if bad > 0 {
            non_finite += bad;
            non_finite_details.push(format!("{name}: {bad}"));
        }
    }
    if missing > 0 {
        return Err(PipelineError::MissingValues {
            count: missing,
            details: missing_details.join(", "),
        });
    }
    if non_finite > 0 {
        return Err(PipelineError::NonFinite {
            count: non_finite,
            details: non_finite_details.join(", "),
        });
    }
    Ok(())
}
