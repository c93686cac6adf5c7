//! Pattern extraction from free-text listing fields.
//!
//! Listing exports pack several numeric facts into the `engine` and
//! `transmission` description strings ("172.0HP 1.6L 4 Cylinder Gasoline
//! Engine", "8-Speed Automatic"). Each extractor captures one numeric group;
//! a non-match is a missing value, never an error. Matching is
//! case-sensitive: the unit tokens are uppercase in the source vocabulary.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::{Column, Table, TableError, col};

static HORSE_POWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)HP").expect("horse power pattern"));
static ENGINE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)L").expect("engine size pattern"));
static CYLINDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) Cylinder").expect("cylinder pattern"));
static SPEED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").expect("speed pattern"));

/// Returns the first captured group of `pattern` parsed as a float.
pub fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)?
        .get(1)
        .and_then(|group| group.as_str().parse().ok())
}

pub fn horse_power(engine: &str) -> Option<f64> {
    capture_number(&HORSE_POWER, engine)
}

pub fn engine_size(engine: &str) -> Option<f64> {
    capture_number(&ENGINE_SIZE, engine)
}

pub fn cylinder_count(engine: &str) -> Option<f64> {
    capture_number(&CYLINDER, engine)
}

pub fn transmission_speed_value(transmission: &str) -> Option<f64> {
    capture_number(&SPEED, transmission)
}

/// Derives `horse_power`, `engine_size`, and `cylinder` from the engine text.
pub fn engine_fields(table: &mut Table) -> Result<(), TableError> {
    let engine = table.text(col::ENGINE)?;
    let horse_power = extract_all(engine, &HORSE_POWER);
    let engine_size = extract_all(engine, &ENGINE_SIZE);
    let cylinder = extract_all(engine, &CYLINDER);
    table.insert(col::HORSE_POWER, Column::Float(horse_power))?;
    table.insert(col::ENGINE_SIZE, Column::Float(engine_size))?;
    table.insert(col::CYLINDER, Column::Float(cylinder))
}

/// Derives `transmission_speed` from the transmission text.
pub fn transmission_speed(table: &mut Table) -> Result<(), TableError> {
    let speeds = extract_all(table.text(col::TRANSMISSION)?, &SPEED);
    table.insert(col::TRANSMISSION_SPEED, Column::Float(speeds))
}

fn extract_all(cells: &[Option<String>], pattern: &Regex) -> Vec<Option<f64>> {
    cells
        .iter()
        .map(|cell| {
            cell.as_deref()
                .and_then(|text| capture_number(pattern, text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GASOLINE_ENGINE: &str = "172.0HP 1.6L 4 Cylinder Gasoline Engine";

    #[test]
    fn captures_all_engine_fields_from_listing_text() {
        assert_eq!(horse_power(GASOLINE_ENGINE), Some(172.0));
        assert_eq!(engine_size(GASOLINE_ENGINE), Some(1.6));
        assert_eq!(cylinder_count(GASOLINE_ENGINE), Some(4.0));
    }

    #[test]
    fn unit_tokens_are_case_sensitive() {
        assert_eq!(horse_power("172.0hp 1.6l"), None);
        assert_eq!(engine_size("172.0hp 1.6l"), None);
    }

    #[test]
    fn horsepower_requires_a_decimal_point() {
        assert_eq!(horse_power("300HP V8"), None);
        assert_eq!(horse_power("300.0HP V8"), Some(300.0));
    }

    #[test]
    fn cylinder_requires_the_space_separated_token() {
        assert_eq!(cylinder_count("V6 Cylinders"), None);
        assert_eq!(cylinder_count("6 Cylinder Engine"), Some(6.0));
    }

    #[test]
    fn speed_takes_the_first_digit_run() {
        assert_eq!(transmission_speed_value("8-Speed Automatic"), Some(8.0));
        assert_eq!(transmission_speed_value("Automatic"), None);
    }

    #[test]
    fn missing_engine_text_yields_missing_fields() {
        let mut table = Table::new();
        table
            .insert(
                col::ENGINE,
                Column::Text(vec![Some(GASOLINE_ENGINE.to_string()), None]),
            )
            .unwrap();
        engine_fields(&mut table).unwrap();
        assert_eq!(table.float(col::HORSE_POWER).unwrap(), &[Some(172.0), None]);
        assert_eq!(table.float(col::CYLINDER).unwrap(), &[Some(4.0), None]);
    }
}
