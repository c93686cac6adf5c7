//! Derived listing features: vehicle age, mileage interactions, accident flag.

use std::collections::HashMap;

use itertools::Itertools;

use crate::data::{Column, Table, TableError, col};

/// Exact raw-text marker for a reported accident.
pub const ACCIDENT_REPORTED: &str = "At least 1 accident or damage reported";

/// Adds `car_age` and `yearly_mileage`. A vehicle from the as-of year would
/// get age zero; those rows are set to 1 so the mileage ratios stay finite.
/// Source policy: genuinely-new vehicles are conflated with one-year-old
/// ones on purpose.
pub fn age_features(table: &mut Table, as_of_year: i32) -> Result<(), TableError> {
    let ages: Vec<Option<f64>> = table
        .float(col::MODEL_YEAR)?
        .iter()
        .map(|year| {
            year.map(|year| {
                let age = f64::from(as_of_year) - year;
                if age == 0.0 { 1.0 } else { age }
            })
        })
        .collect();
    let yearly = ratio(table.float(col::MILAGE)?, &ages);
    table.insert(col::CAR_AGE, Column::Float(ages))?;
    table.insert(col::YEARLY_MILEAGE, Column::Float(yearly))
}

/// Replaces the raw accident text with a 0/1 indicator. Only the exact
/// reported-damage phrase counts; anything else, including missing text,
/// is 0.
pub fn accident_flag(table: &mut Table) -> Result<(), TableError> {
    let flags: Vec<Option<f64>> = table
        .text(col::ACCIDENT)?
        .iter()
        .map(|cell| {
            Some(if cell.as_deref() == Some(ACCIDENT_REPORTED) {
                1.0
            } else {
                0.0
            })
        })
        .collect();
    table.insert(col::ACCIDENT, Column::Float(flags))
}

/// Adds the mileage/age interaction columns and the two per-age group means.
/// `milage_age_ratio` duplicates `yearly_mileage` by design; downstream
/// consumers expect both names.
pub fn mileage_age_interactions(table: &mut Table) -> Result<(), TableError> {
    let milage = table.float(col::MILAGE)?;
    let ages = table.float(col::CAR_AGE)?;
    let product: Vec<Option<f64>> = milage
        .iter()
        .zip(ages)
        .map(|(milage, age)| match (milage, age) {
            (Some(milage), Some(age)) => Some(milage * age),
            _ => None,
        })
        .collect();
    let age_ratio = ratio(milage, ages);
    let mean_milage = group_mean_by_age(ages, milage);
    let mean_ratio = group_mean_by_age(ages, &age_ratio);
    table.insert(col::MILAGE_AGE, Column::Float(product))?;
    table.insert(col::MILAGE_AGE_RATIO, Column::Float(age_ratio))?;
    table.insert(col::MEAN_MILAGE_WITH_AGE, Column::Float(mean_milage))?;
    table.insert(col::MEAN_MILAGE_AGE_RATIO_WITH_AGE, Column::Float(mean_ratio))
}

fn ratio(numerator: &[Option<f64>], denominator: &[Option<f64>]) -> Vec<Option<f64>> {
    numerator
        .iter()
        .zip(denominator)
        .map(|(numerator, denominator)| match (numerator, denominator) {
            (Some(numerator), Some(denominator)) => Some(numerator / denominator),
            _ => None,
        })
        .collect()
}

/// Broadcasts the per-age mean of `values` back onto every row sharing that
/// age. Missing members are excluded from the mean; rows with a missing age
/// stay missing.
fn group_mean_by_age(ages: &[Option<f64>], values: &[Option<f64>]) -> Vec<Option<f64>> {
    let groups: HashMap<i64, Vec<f64>> = ages
        .iter()
        .zip(values)
        .filter_map(|(age, value)| match (age, value) {
            (Some(age), Some(value)) => Some((*age as i64, *value)),
            _ => None,
        })
        .into_group_map();
    ages.iter()
        .map(|age| {
            let members = groups.get(&((*age)? as i64))?;
            Some(members.iter().sum::<f64>() / members.len() as f64)
        })
        .collect()
}
