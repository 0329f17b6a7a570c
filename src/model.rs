//! Visitor records and the success values returned by the service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A visitor as submitted for creation, before validation.
///
/// Date and time stay textual here; the validator decides which formats are
/// accepted and produces the typed values that get bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVisitor {
    pub full_name: String,
    pub visitor_age: i64,
    pub date_of_visit: String,
    pub time_of_visit: String,
    pub assistant_name: String,
    #[serde(default)]
    pub comments: String,
}

/// A loosely typed visitor as received over JSON, keyed by column name.
///
/// Field types are left to the validator so that a mistyped field reports
/// that field's own error.
pub type VisitorRecord = serde_json::Map<String, serde_json::Value>;

impl NewVisitor {
    pub fn to_record(&self) -> VisitorRecord {
        let mut record = VisitorRecord::new();
        record.insert("full_name".into(), self.full_name.clone().into());
        record.insert("visitor_age".into(), self.visitor_age.into());
        record.insert("date_of_visit".into(), self.date_of_visit.clone().into());
        record.insert("time_of_visit".into(), self.time_of_visit.clone().into());
        record.insert("assistant_name".into(), self.assistant_name.clone().into());
        record.insert("comments".into(), self.comments.clone().into());
        record
    }
}

/// Returned by `create_table`.
pub const TABLE_CREATED: &str = "table created successfully";

/// Returned by `delete_all_visitors`.
pub const ALL_VISITORS_DELETED: &str = "all visitors deleted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitorCreated {
    pub id: i64,
}

impl fmt::Display for VisitorCreated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visitor added with ID: {}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitorUpdated {
    pub id: i64,
}

impl fmt::Display for VisitorUpdated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visitor with ID: {} has been updated", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitorDeleted {
    pub id: i64,
}

impl fmt::Display for VisitorDeleted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visitor with ID: {}, has been deleted", self.id)
    }
}
