//! Query Catalog
//!
//! Every statement the visitor service issues, as parameterized SQL text.
//! Values are always bound through `$n` placeholders. The only identifier that
//! varies is the column of an update, and that comes from the [`Column`]
//! allow-list rather than from caller input.

use std::fmt;
use std::str::FromStr;

use crate::error::VisitorError;

pub const TABLE: &str = "visitors";

pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS visitors (
    id SERIAL PRIMARY KEY,
    full_name VARCHAR(255) NOT NULL,
    visitor_age INT NOT NULL,
    date_of_visit DATE NOT NULL,
    time_of_visit TIME NOT NULL,
    assistant_name VARCHAR(255) NOT NULL,
    comments TEXT
)";

pub const INSERT_VISITOR: &str = "INSERT INTO visitors \
     (full_name, visitor_age, date_of_visit, time_of_visit, assistant_name, comments) \
     VALUES ($1, $2, $3, $4, $5, $6) RETURNING id";

pub const SELECT_ALL_SUMMARY: &str = "SELECT id, full_name FROM visitors";

pub const SELECT_BY_ID: &str = "SELECT * FROM visitors WHERE id = $1";

pub const DELETE_BY_ID: &str = "DELETE FROM visitors WHERE id = $1";

pub const DELETE_ALL: &str = "DELETE FROM visitors";

pub const SELECT_MOST_RECENT_ID: &str = "SELECT id FROM visitors ORDER BY id DESC LIMIT 1";

/// Updatable columns of the `visitors` table, in schema order.
///
/// `id` is absent: it is assigned by the store and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    FullName,
    VisitorAge,
    DateOfVisit,
    TimeOfVisit,
    AssistantName,
    Comments,
}

impl Column {
    /// Schema order, which is also the insert's bind order.
    pub const ALL: [Column; 6] = [
        Column::FullName,
        Column::VisitorAge,
        Column::DateOfVisit,
        Column::TimeOfVisit,
        Column::AssistantName,
        Column::Comments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Column::FullName => "full_name",
            Column::VisitorAge => "visitor_age",
            Column::DateOfVisit => "date_of_visit",
            Column::TimeOfVisit => "time_of_visit",
            Column::AssistantName => "assistant_name",
            Column::Comments => "comments",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = VisitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| VisitorError::UnknownColumn(s.to_string()))
    }
}

/// `UPDATE visitors SET <column> = $1 WHERE id = $2`
pub fn update_statement(column: Column) -> String {
    format!("UPDATE {TABLE} SET {column} = $1 WHERE id = $2")
}
