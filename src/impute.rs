//! Column-specific missing-value fills.

use std::collections::HashMap;

use crate::data::{Column, Table, TableError, col};
use crate::stats;

/// Transmission types without a discrete gear count. Any speed extracted for
/// these rows is noise and is replaced wholesale with the global median.
const GEARLESS_TYPES: &[&str] = &["CVT", "Fixed Gear"];

/// Fills gaps with the column's mean over non-missing values. A column with
/// no values at all is left as-is and caught by the completeness check.
pub fn fill_mean(table: &mut Table, name: &str) -> Result<(), TableError> {
    let values = table.float(name)?;
    let fill = stats::mean(values);
    let filled: Vec<Option<f64>> = values.iter().map(|cell| cell.or(fill)).collect();
    table.insert(name, Column::Float(filled))
}

/// Fills gaps with the most frequent value; ties break to the smallest.
pub fn fill_mode_float(table: &mut Table, name: &str) -> Result<(), TableError> {
    let values = table.float(name)?;
    let fill = stats::mode_float(values);
    let filled: Vec<Option<f64>> = values.iter().map(|cell| cell.or(fill)).collect();
    table.insert(name, Column::Float(filled))
}

/// Fills gaps with the most frequent label; ties break lexicographically.
pub fn fill_mode_text(table: &mut Table, name: &str) -> Result<(), TableError> {
    let values = table.text(name)?;
    let fill = stats::mode_text(values);
    let filled: Vec<Option<String>> = values
        .iter()
        .map(|cell| cell.clone().or_else(|| fill.clone()))
        .collect();
    table.insert(name, Column::Text(filled))
}

/// Two-step transmission-speed policy: gearless types (CVT, Fixed Gear) are
/// overwritten with the global median — computed before the overwrite — and
/// remaining gaps take the median within their transmission-type group.
pub fn normalize_transmission_speed(table: &mut Table) -> Result<(), TableError> {
    let types = table.text(col::TRANSMISSION_TYPE)?.to_vec();
    let speeds = table.float(col::TRANSMISSION_SPEED)?;
    let global_median = stats::median(speeds);

    let mut normalized: Vec<Option<f64>> = speeds
        .iter()
        .zip(&types)
        .map(|(speed, kind)| match kind.as_deref() {
            Some(kind) if GEARLESS_TYPES.contains(&kind) => global_median,
            _ => *speed,
        })
        .collect();

    let mut by_type: HashMap<&str, Vec<Option<f64>>> = HashMap::new();
    for (speed, kind) in normalized.iter().zip(&types) {
        if let Some(kind) = kind.as_deref() {
            by_type.entry(kind).or_default().push(*speed);
        }
    }
    let medians: HashMap<&str, Option<f64>> = by_type
        .iter()
        .map(|(kind, members)| (*kind, stats::median(members)))
        .collect();

    for (speed, kind) in normalized.iter_mut().zip(&types) {
        if speed.is_none()
            && let Some(kind) = kind.as_deref()
        {
            *speed = medians.get(kind).copied().flatten();
        }
    }
    table.insert(col::TRANSMISSION_SPEED, Column::Float(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speed_table(types: &[&str], speeds: &[Option<f64>]) -> Table {
        let mut table = Table::new();
        table
            .insert(
                col::TRANSMISSION_TYPE,
                Column::Text(types.iter().map(|t| Some(t.to_string())).collect()),
            )
            .unwrap();
        table
            .insert(col::TRANSMISSION_SPEED, Column::Float(speeds.to_vec()))
            .unwrap();
        table
    }

    #[test]
    fn mean_fill_uses_only_present_values() {
        let mut table = Table::new();
        table
            .insert(
                col::HORSE_POWER,
                Column::Float(vec![Some(100.0), None, Some(300.0)]),
            )
            .unwrap();
        fill_mean(&mut table, col::HORSE_POWER).unwrap();
        assert_eq!(
            table.float(col::HORSE_POWER).unwrap(),
            &[Some(100.0), Some(200.0), Some(300.0)]
        );
    }

    #[test]
    fn gearless_types_are_overwritten_with_the_global_median() {
        // Global median over [7, 8, 9, 2] -> 7.5; the CVT row's extracted 7
        // is replaced even though it was present.
        let mut table = speed_table(
            &["A/T", "A/T", "M/T", "CVT"],
            &[Some(8.0), Some(9.0), Some(2.0), Some(7.0)],
        );
        normalize_transmission_speed(&mut table).unwrap();
        assert_eq!(
            table.float(col::TRANSMISSION_SPEED).unwrap(),
            &[Some(8.0), Some(9.0), Some(2.0), Some(7.5)]
        );
    }

    #[test]
    fn missing_speeds_fill_from_their_type_group_not_globally() {
        let mut table = speed_table(
            &["A/T", "A/T", "A/T", "M/T", "M/T", "M/T"],
            &[Some(8.0), Some(10.0), None, Some(5.0), Some(5.0), None],
        );
        normalize_transmission_speed(&mut table).unwrap();
        let speeds = table.float(col::TRANSMISSION_SPEED).unwrap();
        assert_eq!(speeds[2], Some(9.0));
        assert_eq!(speeds[5], Some(5.0));
    }

    #[test]
    fn a_group_with_no_observations_stays_missing() {
        let mut table = speed_table(&["A/T", "DCT"], &[Some(8.0), None]);
        normalize_transmission_speed(&mut table).unwrap();
        let speeds = table.float(col::TRANSMISSION_SPEED).unwrap();
        assert_eq!(speeds[1], None);
    }
}
