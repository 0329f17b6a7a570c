//! REST API Data Transfer Objects
//!
//! Defines request/response types for the REST API endpoints.

use serde::{Deserialize, Serialize};

/// JSON response: { success, data?, error? }
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Plain confirmation message, optionally naming the affected visitor.
#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(message: impl Into<String>, id: i64) -> Self {
        Self {
            message: message.into(),
            id: Some(id),
        }
    }
}

/// Last visitor id
#[derive(Debug, Serialize)]
pub struct LastVisitorDto {
    pub id: i64,
}

/// Single-column update request
#[derive(Debug, Deserialize)]
pub struct UpdateVisitorRequest {
    pub column: String,
    pub value: serde_json::Value,
}

/// Urlencoded body of the HTML visitor form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorForm {
    pub visitor_name: String,
    pub assistant_name: String,
    pub visitor_age: String,
    pub date_of_visit: String,
    pub time_of_visit: String,
    #[serde(default)]
    pub comments: String,
}
