//! # Visitor Registry
//!
//! Records visitor entries (name, age, visit date and time, assistant,
//! comments) in a single relational table and exposes create / read /
//! update / delete operations, an HTML form front-end and a JSON API.
//!
//! ## Pipeline
//! ```text
//! HTTP handler / CLI
//!     ↓
//! [VisitorService]        → orchestrates, maps outcomes to VisitorError
//!     ↓
//! [validator]             → per-field shape checks, typed bind values
//!     ↓
//! [catalog]               → parameterized SQL text, column allow-list
//!     ↓
//! [dyn QueryExecutor]     → PostgreSQL or in-memory store
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use visitor_registry::{MemoryExecutor, NewVisitor, VisitorService};
//!
//! let service = VisitorService::new(Arc::new(MemoryExecutor::new()));
//! service.create_table().await?;
//! let created = service.add_visitor(&NewVisitor {
//!     full_name: "John Doe".into(),
//!     visitor_age: 30,
//!     date_of_visit: "04/12/2024".into(),
//!     time_of_visit: "10:30".into(),
//!     assistant_name: "Jane Smith".into(),
//!     comments: String::new(),
//! }).await?;
//! println!("{created}"); // Visitor added with ID: 1
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod rest;
pub mod service;
pub mod store;
pub mod validator;

pub use catalog::Column;
pub use config::Config;
pub use error::{VisitorError, VisitorResult};
pub use model::{NewVisitor, VisitorCreated, VisitorDeleted, VisitorRecord, VisitorUpdated};
pub use service::VisitorService;
pub use store::{MemoryExecutor, PgExecutor, QueryExecutor, Row, StoreError, Value};
