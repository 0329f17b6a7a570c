//! Visitor Service Error Types

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by every visitor operation.
///
/// Validation and identity variants are raised before the store is touched.
/// Only [`VisitorError::Store`] originates from a round trip.
#[derive(Error, Debug)]
pub enum VisitorError {
    #[error("Full name is invalid, use format 'name surname'")]
    InvalidName,

    #[error("Assistant name is invalid, use format 'name surname'")]
    InvalidAssistantName,

    #[error("age is invalid, please enter a valid age")]
    InvalidAge,

    #[error("date is not valid, use format DD/MM/YYYY")]
    InvalidDate,

    #[error("time is not valid, use format HH:MM")]
    InvalidTime,

    #[error("invalid comment, please enter a valid comment")]
    InvalidComment,

    /// Missing, zero, negative or non-numeric id
    #[error("please provide a valid ID")]
    InvalidId,

    /// No row for the requested id (or no rows at all for `view_last_visitor`)
    #[error("Visitor does not exist in database")]
    NotFound,

    /// Bulk delete on an empty table
    #[error("there are no visitors to delete")]
    NoVisitors,

    /// Update target outside the column allow-list
    #[error("\"{0}\" does not exist in the database")]
    UnknownColumn(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl VisitorError {
    /// Stable machine-readable code used by the JSON API.
    pub fn code(&self) -> &'static str {
        match self {
            VisitorError::InvalidName => "INVALID_NAME",
            VisitorError::InvalidAssistantName => "INVALID_ASSISTANT_NAME",
            VisitorError::InvalidAge => "INVALID_AGE",
            VisitorError::InvalidDate => "INVALID_DATE",
            VisitorError::InvalidTime => "INVALID_TIME",
            VisitorError::InvalidComment => "INVALID_COMMENT",
            VisitorError::InvalidId => "INVALID_ID",
            VisitorError::NotFound => "NOT_FOUND",
            VisitorError::NoVisitors => "NO_VISITORS",
            VisitorError::UnknownColumn(_) => "UNKNOWN_COLUMN",
            VisitorError::Store(_) => "STORE_FAILURE",
        }
    }

    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, VisitorError::Store(_))
    }
}

/// Result type for visitor operations
pub type VisitorResult<T> = Result<T, VisitorError>;
