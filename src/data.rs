//! In-memory listing table: ordered, named columns over optional cells.
//!
//! `Option::None` is the missing-value sentinel throughout the pipeline. It is
//! distinct from zero, the empty string, and NaN, and it survives extraction
//! and classification until imputation resolves it. A column is either 64-bit
//! float or text; rows are never added or removed once a table is built —
//! stages add, overwrite, or drop whole columns.

use thiserror::Error;

/// Column names shared across the pipeline stages.
pub mod col {
    pub const BRAND: &str = "brand";
    pub const MODEL: &str = "model";
    pub const MODEL_YEAR: &str = "model_year";
    pub const MILAGE: &str = "milage";
    pub const FUEL_TYPE: &str = "fuel_type";
    pub const ENGINE: &str = "engine";
    pub const TRANSMISSION: &str = "transmission";
    pub const EXT_COL: &str = "ext_col";
    pub const INT_COL: &str = "int_col";
    pub const ACCIDENT: &str = "accident";
    pub const CLEAN_TITLE: &str = "clean_title";

    pub const HORSE_POWER: &str = "horse_power";
    pub const ENGINE_SIZE: &str = "engine_size";
    pub const CYLINDER: &str = "cylinder";
    pub const TRANSMISSION_SPEED: &str = "transmission_speed";
    pub const TRANSMISSION_TYPE: &str = "transmission_type";
    pub const CAR_AGE: &str = "car_age";
    pub const YEARLY_MILEAGE: &str = "yearly_mileage";
    pub const MODEL_CLASS: &str = "model_class";
    pub const BRAND_CAT: &str = "brand_cat";
    pub const EXT_COL_CAT: &str = "ext_col_cat";
    pub const INT_COL_CAT: &str = "int_col_cat";
    pub const MILAGE_AGE: &str = "milage_age";
    pub const MILAGE_AGE_RATIO: &str = "milage_age_ratio";
    pub const MEAN_MILAGE_WITH_AGE: &str = "mean_milage_with_age";
    pub const MEAN_MILAGE_AGE_RATIO_WITH_AGE: &str = "mean_milage_age_ratio_with_age";
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("column '{0}' not found in table")]
    UnknownColumn(String),
    #[error("column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("column '{column}' holds {actual} row(s), table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Text(_) => "text",
        }
    }

    pub fn missing_count(&self) -> usize {
        match self {
            Column::Float(values) => values.iter().filter(|cell| cell.is_none()).count(),
            Column::Text(values) => values.iter().filter(|cell| cell.is_none()).count(),
        }
    }

    /// Counts NaN and infinite cells. Text columns report zero.
    pub fn non_finite_count(&self) -> usize {
        match self {
            Column::Float(values) => values
                .iter()
                .flatten()
                .filter(|value| !value.is_finite())
                .count(),
            Column::Text(_) => 0,
        }
    }

    pub fn display_cell(&self, row: usize) -> String {
        match self {
            Column::Float(values) => match values.get(row).copied().flatten() {
                Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                    format!("{value:.0}")
                }
                Some(value) => value.to_string(),
                None => String::new(),
            },
            Column::Text(values) => values
                .get(row)
                .and_then(|cell| cell.clone())
                .unwrap_or_default(),
        }
    }
}

/// An ordered collection of named columns sharing one row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        Ok(&self.columns[index])
    }

    pub fn float(&self, name: &str) -> Result<&[Option<f64>], TableError> {
        match self.column(name)? {
            Column::Float(values) => Ok(values),
            other => Err(TableError::TypeMismatch {
                column: name.to_string(),
                expected: "float",
                actual: other.type_name(),
            }),
        }
    }

    pub fn text(&self, name: &str) -> Result<&[Option<String>], TableError> {
        match self.column(name)? {
            Column::Text(values) => Ok(values),
            other => Err(TableError::TypeMismatch {
                column: name.to_string(),
                expected: "text",
                actual: other.type_name(),
            }),
        }
    }

    /// Adds a new column at the end, or replaces an existing column in place.
    /// Replacement may change the column's type (e.g. binarizing raw accident
    /// text into a 0/1 float column).
    pub fn insert(&mut self, name: &str, column: Column) -> Result<(), TableError> {
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.row_count(),
                actual: column.len(),
            });
        }
        match self.column_index(name) {
            Some(index) => self.columns[index] = column,
            None => {
                self.names.push(name.to_string());
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Removes the named columns; unknown names are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let mut index = 0;
        while index < self.names.len() {
            if names.contains(&self.names[index].as_str()) {
                self.names.remove(index);
                self.columns.remove(index);
            } else {
                index += 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    pub fn row_display(&self, row: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.display_cell(row))
            .collect()
    }
}
