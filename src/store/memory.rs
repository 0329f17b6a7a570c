//! In-process executor for the visitor catalog.
//!
//! Understands exactly the statements in [`crate::catalog`] and keeps the
//! table in a `BTreeMap` keyed by id. Ids behave like a `SERIAL` column: they
//! start at 1 and are never reused, even after a bulk delete.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{QueryExecutor, Row, StoreError, StoreResult, Value};
use crate::catalog::{self, Column};

#[derive(Debug, Default)]
struct Table {
    created: bool,
    last_id: i64,
    rows: BTreeMap<i64, Row>,
}

/// Catalog-aware in-memory store.
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    table: Mutex<Table>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.table.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn run(&self, statement: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        let mut table = self.table.lock();

        if statement == catalog::CREATE_TABLE {
            expect_params(statement, params, 0)?;
            table.created = true;
            return Ok(Vec::new());
        }
        if !table.created {
            return Err(StoreError::MissingTable(catalog::TABLE.to_string()));
        }

        match statement {
            catalog::INSERT_VISITOR => {
                expect_params(statement, params, Column::ALL.len())?;
                table.last_id += 1;
                let id = table.last_id;
                let mut row = Row::new().with("id", id);
                for (column, value) in Column::ALL.iter().zip(params) {
                    row.set(column.as_str(), value.clone());
                }
                table.rows.insert(id, row);
                Ok(vec![Row::new().with("id", id)])
            }
            catalog::SELECT_ALL_SUMMARY => {
                expect_params(statement, params, 0)?;
                Ok(table
                    .rows
                    .iter()
                    .map(|(id, row)| {
                        let name = row.get("full_name").cloned().unwrap_or(Value::Null);
                        Row::new().with("id", *id).with("full_name", name)
                    })
                    .collect())
            }
            catalog::SELECT_BY_ID => {
                expect_params(statement, params, 1)?;
                let id = id_param(&params[0])?;
                Ok(table.rows.get(&id).cloned().into_iter().collect())
            }
            catalog::DELETE_BY_ID => {
                expect_params(statement, params, 1)?;
                let id = id_param(&params[0])?;
                table.rows.remove(&id);
                Ok(Vec::new())
            }
            catalog::DELETE_ALL => {
                expect_params(statement, params, 0)?;
                table.rows.clear();
                Ok(Vec::new())
            }
            catalog::SELECT_MOST_RECENT_ID => {
                expect_params(statement, params, 0)?;
                Ok(table
                    .rows
                    .keys()
                    .next_back()
                    .map(|id| Row::new().with("id", *id))
                    .into_iter()
                    .collect())
            }
            _ => {
                let column = Column::ALL
                    .into_iter()
                    .find(|c| catalog::update_statement(*c) == statement)
                    .ok_or_else(|| StoreError::UnsupportedStatement(statement.to_string()))?;
                expect_params(statement, params, 2)?;
                let id = id_param(&params[1])?;
                if let Some(row) = table.rows.get_mut(&id) {
                    row.set(column.as_str(), params[0].clone());
                }
                Ok(Vec::new())
            }
        }
    }
}

fn expect_params(statement: &str, params: &[Value], expected: usize) -> StoreResult<()> {
    if params.len() == expected {
        Ok(())
    } else {
        Err(StoreError::Conversion(format!(
            "statement expects {expected} parameters, got {}: {statement}",
            params.len()
        )))
    }
}

fn id_param(value: &Value) -> StoreResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| StoreError::Conversion(format!("id must be an integer, got {value}")))
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn query(&self, statement: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        let rows = self.run(statement, params)?;
        tracing::trace!(params = params.len(), rows = rows.len(), "memory_query");
        Ok(rows)
    }
}
