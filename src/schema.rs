//! Fixed table catalog for the four movie datasets.
//!
//! Every dataset maps to exactly one table whose column list is hardcoded
//! here. Nothing is inferred from file contents: the same [`ColumnDef`] slice
//! is returned for a dataset no matter what the input looks like.
//!
//! The catalog also owns the per-dataset input file name and delimiter, and
//! the fixed order in which tables are emitted ([`Dataset::ALL`]).

use std::fmt;

use crate::{rows::RawRow, script::TransformedRow, title::split_title_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Real,
    Text,
}

impl SqlType {
    pub fn keyword(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Nullable,
    PrimaryKey,
    NotNull,
}

impl Constraint {
    fn suffix(&self) -> Option<&'static str> {
        match self {
            Constraint::Nullable => None,
            Constraint::PrimaryKey => Some("PRIMARY KEY"),
            Constraint::NotNull => Some("NOT NULL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub constraint: Constraint,
}

impl ColumnDef {
    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            sql_type: SqlType::Integer,
            constraint: Constraint::PrimaryKey,
        }
    }

    pub const fn required(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            constraint: Constraint::NotNull,
        }
    }

    pub const fn nullable(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            constraint: Constraint::Nullable,
        }
    }

    /// Column declaration as it appears inside `CREATE TABLE`, e.g. `rating REAL NOT NULL`.
    pub fn declaration(&self) -> String {
        match self.constraint.suffix() {
            Some(suffix) => format!("{} {} {}", self.name, self.sql_type, suffix),
            None => format!("{} {}", self.name, self.sql_type),
        }
    }
}

const MOVIES_COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::required("title", SqlType::Text),
    ColumnDef::nullable("year", SqlType::Integer),
    ColumnDef::nullable("genres", SqlType::Text),
];

const RATINGS_COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::required("user_id", SqlType::Integer),
    ColumnDef::required("movie_id", SqlType::Integer),
    ColumnDef::required("rating", SqlType::Real),
    ColumnDef::required("timestamp", SqlType::Integer),
];

const TAGS_COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::required("user_id", SqlType::Integer),
    ColumnDef::required("movie_id", SqlType::Integer),
    ColumnDef::required("tag", SqlType::Text),
    ColumnDef::required("timestamp", SqlType::Integer),
];

const USERS_COLUMNS: &[ColumnDef] = &[
    ColumnDef::primary_key("id"),
    ColumnDef::required("name", SqlType::Text),
    ColumnDef::required("email", SqlType::Text),
    ColumnDef::nullable("gender", SqlType::Text),
    ColumnDef::required("register_date", SqlType::Text),
    ColumnDef::nullable("occupation", SqlType::Text),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Movies,
    Ratings,
    Tags,
    Users,
}

impl Dataset {
    /// Emission order for DDL and INSERT blocks.
    pub const ALL: [Dataset; 4] = [
        Dataset::Movies,
        Dataset::Ratings,
        Dataset::Tags,
        Dataset::Users,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Dataset::Movies => "movies",
            Dataset::Ratings => "ratings",
            Dataset::Tags => "tags",
            Dataset::Users => "users",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Movies => "movies.csv",
            Dataset::Ratings => "ratings.csv",
            Dataset::Tags => "tags.csv",
            Dataset::Users => "users.txt",
        }
    }

    pub fn delimiter(&self) -> u8 {
        match self {
            Dataset::Users => b'|',
            _ => b',',
        }
    }

    pub fn columns(&self) -> &'static [ColumnDef] {
        match self {
            Dataset::Movies => MOVIES_COLUMNS,
            Dataset::Ratings => RATINGS_COLUMNS,
            Dataset::Tags => TAGS_COLUMNS,
            Dataset::Users => USERS_COLUMNS,
        }
    }

    /// Maps a raw file row onto this dataset's column layout.
    ///
    /// Movies arrive as `(id, title, genres)` and leave as
    /// `(id, title, year, genres)`, the year being split off the title.
    /// Every other dataset passes through positionally.
    pub fn transform_row(&self, raw: RawRow) -> TransformedRow {
        match self {
            Dataset::Movies => {
                let mut fields = raw.into_iter();
                let id = fields.next();
                let raw_title = fields.next();
                let genres = fields.next();
                let (title, year) = split_title_year(raw_title.as_deref());
                vec![id, title, year.map(|y| y.to_string()), genres]
            }
            Dataset::Ratings | Dataset::Tags | Dataset::Users => {
                raw.into_iter().map(Some).collect()
            }
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
