//! Shared test helpers: a recording executor with scripted responses.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use visitor_registry::store::StoreResult;
use visitor_registry::{NewVisitor, QueryExecutor, Row, Value, VisitorService};

type Responder = dyn Fn(&str, &[Value]) -> StoreResult<Vec<Row>> + Send + Sync;

/// Records every statement it receives and answers with `responder`.
pub struct RecordingExecutor {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    responder: Box<Responder>,
}

impl RecordingExecutor {
    pub fn new(
        responder: impl Fn(&str, &[Value]) -> StoreResult<Vec<Row>> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Answers every statement with the same rows.
    pub fn returning(rows: Vec<Row>) -> Arc<Self> {
        Self::new(move |_, _| Ok(rows.clone()))
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().clone()
    }

    pub fn statements(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn count_matching(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(s, _)| s.contains(needle))
            .count()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn query(&self, statement: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        self.calls
            .lock()
            .push((statement.to_string(), params.to_vec()));
        (self.responder)(statement, params)
    }
}

pub fn service_with(executor: &Arc<RecordingExecutor>) -> VisitorService {
    VisitorService::new(executor.clone())
}

pub fn mock_visitor() -> NewVisitor {
    NewVisitor {
        full_name: "John Doe".to_string(),
        visitor_age: 30,
        date_of_visit: "04/12/2024".to_string(),
        time_of_visit: "10:30".to_string(),
        assistant_name: "Jane Smith".to_string(),
        comments: "Interested in learning about Docker.".to_string(),
    }
}
