//! Frequency counts for the categorical feature columns.

use itertools::Itertools;

use crate::data::{Column, Table};

/// One row per (column, value): count and share, most frequent first with
/// ties ordered by value. `top` of zero keeps every value.
pub fn compute_frequency_rows(table: &Table, top: usize) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for (name, column) in table.iter() {
        let Column::Text(values) = column else {
            continue;
        };
        if values.is_empty() {
            continue;
        }
        let total = values.len();
        let mut items: Vec<(&str, usize)> = values
            .iter()
            .map(|cell| cell.as_deref().unwrap_or("<empty>"))
            .counts()
            .into_iter()
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if top > 0 && items.len() > top {
            items.truncate(top);
        }
        for (value, count) in items {
            let percent = (count as f64 / total as f64) * 100.0;
            rows.push(vec![
                name.to_string(),
                value.to_string(),
                count.to_string(),
                format!("{percent:.2}%"),
            ]);
        }
    }
    rows
}
