//! # Visitor Service
//!
//! Orchestrates validation, the query catalog and the injected
//! [`QueryExecutor`]. Each operation is one logical unit of work: pure
//! validation first, then at most two sequential round trips (an existence
//! probe and the mutation). Nothing is retried.
//!
//! The probe and the mutation are separate statements, not one transaction.
//! Two requests deleting the same id can both pass the probe; the second
//! delete then removes nothing and still reports success.

use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::{self, Column};
use crate::error::{VisitorError, VisitorResult};
use crate::model::{
    NewVisitor, VisitorCreated, VisitorDeleted, VisitorRecord, VisitorUpdated,
    ALL_VISITORS_DELETED, TABLE_CREATED,
};
use crate::store::{QueryExecutor, Row, StoreError, Value};
use crate::validator;

/// Visitor operations over a shared executor.
///
/// Cheap to clone; holds no mutable state of its own.
#[derive(Clone)]
pub struct VisitorService {
    executor: Arc<dyn QueryExecutor>,
}

impl VisitorService {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<dyn QueryExecutor> {
        &self.executor
    }

    async fn query(&self, statement: &str, params: &[Value]) -> VisitorResult<Vec<Row>> {
        Ok(self.executor.query(statement, params).await?)
    }

    /// Create the `visitors` table if it does not exist yet.
    pub async fn create_table(&self) -> VisitorResult<&'static str> {
        self.query(catalog::CREATE_TABLE, &[]).await?;
        Ok(TABLE_CREATED)
    }

    pub async fn add_visitor(&self, visitor: &NewVisitor) -> VisitorResult<VisitorCreated> {
        let params = validator::validate_visitor(visitor)?;
        self.insert(&params).await
    }

    /// Add a visitor from a loosely typed JSON body. Each field is checked
    /// against its column, so a mistyped field reports its own error.
    pub async fn add_visitor_record(&self, record: &VisitorRecord) -> VisitorResult<VisitorCreated> {
        let params = validator::validate_record(record)?;
        self.insert(&params).await
    }

    async fn insert(&self, params: &[Value]) -> VisitorResult<VisitorCreated> {
        let rows = self.query(catalog::INSERT_VISITOR, params).await?;
        let id = rows
            .first()
            .ok_or_else(|| StoreError::MissingColumn("id".to_string()))?
            .get_i64("id")?;
        Ok(VisitorCreated { id })
    }

    /// `id` and `full_name` of every visitor, in the store's order.
    pub async fn list_visitors(&self) -> VisitorResult<Vec<Row>> {
        self.query(catalog::SELECT_ALL_SUMMARY, &[]).await
    }

    /// Fetch one visitor. The result always holds exactly one row, with
    /// `date_of_visit` rendered as `YYYY-MM-DD`.
    pub async fn view_visitor(&self, id: i64) -> VisitorResult<Vec<Row>> {
        validate_id(id)?;
        let mut rows = self.query(catalog::SELECT_BY_ID, &[Value::Int(id)]).await?;
        let Some(row) = rows.first_mut() else {
            return Err(VisitorError::NotFound);
        };

        let column = Column::DateOfVisit.as_str();
        if let Some(date) = row.get(column).and_then(Value::as_date) {
            row.set(column, date.format("%Y-%m-%d").to_string());
        }
        rows.truncate(1);
        Ok(rows)
    }

    /// Change a single column of an existing visitor.
    ///
    /// The value is checked against the column's rules before the existence
    /// probe. A column outside the allow-list is reported after the probe, so
    /// a missing visitor takes precedence; either way no update is issued.
    pub async fn update_visitor(
        &self,
        id: i64,
        column: &str,
        value: &serde_json::Value,
    ) -> VisitorResult<VisitorUpdated> {
        validate_id(id)?;
        let target = match Column::from_str(column) {
            Ok(column) => Ok((column, validator::validate_field(column, value)?)),
            Err(unknown) => Err(unknown),
        };

        self.view_visitor(id).await?;

        let (column, bound) = target?;
        self.query(&catalog::update_statement(column), &[bound, Value::Int(id)])
            .await?;
        Ok(VisitorUpdated { id })
    }

    pub async fn delete_visitor(&self, id: i64) -> VisitorResult<VisitorDeleted> {
        validate_id(id)?;
        self.view_visitor(id).await?;
        self.query(catalog::DELETE_BY_ID, &[Value::Int(id)]).await?;
        Ok(VisitorDeleted { id })
    }

    /// Remove every visitor. Fails with [`VisitorError::NoVisitors`] on an
    /// empty table without issuing the delete.
    pub async fn delete_all_visitors(&self) -> VisitorResult<&'static str> {
        if self.list_visitors().await?.is_empty() {
            return Err(VisitorError::NoVisitors);
        }
        self.query(catalog::DELETE_ALL, &[]).await?;
        Ok(ALL_VISITORS_DELETED)
    }

    /// Highest assigned id still present in the table.
    pub async fn view_last_visitor(&self) -> VisitorResult<i64> {
        let rows = self.query(catalog::SELECT_MOST_RECENT_ID, &[]).await?;
        let row = rows.first().ok_or(VisitorError::NotFound)?;
        Ok(row.get_i64("id")?)
    }
}

/// Ids are store-assigned serials, so anything below 1 cannot exist.
pub fn validate_id(id: i64) -> VisitorResult<()> {
    if id >= 1 {
        Ok(())
    } else {
        Err(VisitorError::InvalidId)
    }
}

/// Parse an id received as text (path segment, form field, CLI argument).
pub fn parse_id(raw: &str) -> VisitorResult<i64> {
    let id = raw.trim().parse::<i64>().map_err(|_| VisitorError::InvalidId)?;
    validate_id(id)?;
    Ok(id)
}
