//! SQL script assembly.
//!
//! A script is a fixed sequence of blocks joined by one blank line:
//! header comment, pragma, `BEGIN TRANSACTION;`, the DDL of every table,
//! the INSERT of every table that has rows, then `COMMIT;`. Tables always
//! appear in [`Dataset::ALL`] order and empty blocks leave no trace.

use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    data::coerce_literal,
    schema::{ColumnDef, Dataset},
};

pub const SCRIPT_HEADER: &str = "-- SQLite init script for movies_rating.db";
pub const PRAGMA_FOREIGN_KEYS_OFF: &str = "PRAGMA foreign_keys = OFF;";
pub const BEGIN_TRANSACTION: &str = "BEGIN TRANSACTION;";
pub const COMMIT: &str = "COMMIT;";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Row values aligned with a dataset's columns; `None` renders as `NULL`.
pub type TransformedRow = Vec<Option<String>>;

pub fn create_table_sql(table: &str, columns: &[ColumnDef]) -> String {
    let column_sql = columns
        .iter()
        .map(ColumnDef::declaration)
        .join(",\n    ");
    format!("DROP TABLE IF EXISTS {table};\nCREATE TABLE {table} (\n    {column_sql}\n);\n")
}

/// Renders one `(v1, v2, ...)` tuple. Missing trailing fields become `NULL`
/// and fields beyond the declared columns are ignored.
pub fn row_values_sql(columns: &[ColumnDef], row: &[Option<String>]) -> String {
    let values = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = row.get(idx).and_then(|v| v.as_deref());
            coerce_literal(value, column.sql_type)
        })
        .join(", ");
    format!("({values})")
}

/// Single multi-row INSERT, or an empty string when there are no rows.
pub fn insert_sql(table: &str, columns: &[ColumnDef], rows: &[TransformedRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let names = columns.iter().map(|column| column.name).join(", ");
    let values = rows
        .iter()
        .map(|row| row_values_sql(columns, row))
        .join(",\n");
    format!("INSERT INTO {table} ({names}) VALUES\n{values};\n")
}

#[derive(Debug, Default)]
pub struct Script {
    rows: HashMap<Dataset, Vec<TransformedRow>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(&mut self, dataset: Dataset, rows: Vec<TransformedRow>) {
        self.rows.insert(dataset, rows);
    }

    pub fn rows(&self, dataset: Dataset) -> &[TransformedRow] {
        self.rows.get(&dataset).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn render(&self) -> String {
        let mut blocks = vec![
            SCRIPT_HEADER.to_string(),
            PRAGMA_FOREIGN_KEYS_OFF.to_string(),
            BEGIN_TRANSACTION.to_string(),
        ];
        blocks.extend(
            Dataset::ALL
                .iter()
                .map(|dataset| create_table_sql(dataset.table_name(), dataset.columns())),
        );
        blocks.extend(Dataset::ALL.iter().map(|dataset| {
            insert_sql(dataset.table_name(), dataset.columns(), self.rows(*dataset))
        }));
        blocks.push(COMMIT.to_string());
        blocks
            .iter()
            .filter(|block| !block.is_empty())
            .join(BLOCK_SEPARATOR)
    }
}
