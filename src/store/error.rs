//! Store Error Types

use thiserror::Error;

/// Failures raised by a [`QueryExecutor`](super::QueryExecutor).
#[derive(Error, Debug)]
pub enum StoreError {
    /// PostgreSQL driver error (connectivity, constraint violation, undefined column)
    #[error("Database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Store could not be reached or the connection was closed
    #[error("Connection error: {0}")]
    Connection(String),

    /// A value could not be converted to or from a column type
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// A statement returned a row without an expected column
    #[error("Column '{0}' missing from result row")]
    MissingColumn(String),

    /// The statement targets a table that has not been created
    #[error("relation \"{0}\" does not exist")]
    MissingTable(String),

    /// The executor does not know how to run the statement
    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
