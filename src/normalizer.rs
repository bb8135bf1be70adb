// src/normalizer.rs
use crate::data_types::{CellValue, Record, Table};

/// Turns a sheet table into records keyed by column label, in row order.
/// Rows without a usable `Name` are dropped.
pub fn normalize(table: &Table) -> Vec<Record> {
    let labels = labels(table);

    table
        .rows
        .iter()
        .map(|row| zip_row(&labels, row))
        .filter(|record| !record.name().trim().is_empty())
        .collect()
}

/// The first row only, with no `Name` requirement.
pub fn first_record(table: &Table) -> Option<Record> {
    let row = table.rows.first()?;
    Some(zip_row(&labels(table), row))
}

fn labels(table: &Table) -> Vec<String> {
    table.columns.iter().map(|l| l.trim().to_string()).collect()
}

fn zip_row(labels: &[String], row: &[Option<CellValue>]) -> Record {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = row
                .get(i)
                .and_then(|cell| cell.as_ref())
                .map(|cell| cell.display())
                .unwrap_or_default();
            (label.clone(), value)
        })
        .collect()
}
