//! Visitor service behaviour against a recording executor.
//!
//! Checks which statements are issued, with which bound values, and how
//! store results turn into success values or errors.

mod common;

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use visitor_registry::catalog;
use visitor_registry::store::StoreError;
use visitor_registry::{Row, Value, VisitorError};

use common::{mock_visitor, service_with, RecordingExecutor};

fn john_doe_row(id: i64) -> Row {
    Row::new()
        .with("id", id)
        .with("full_name", "John Doe")
        .with("visitor_age", 30)
        .with(
            "date_of_visit",
            NaiveDate::from_ymd_opt(2024, 4, 12)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .map(Value::Timestamp)
                .unwrap(),
        )
        .with("time_of_visit", NaiveTime::from_hms_opt(10, 30, 0).unwrap())
        .with("assistant_name", "Jane Smith")
        .with("comments", "Interested in learning about Docker.")
}

/// Answers select-by-id with `row` when the id matches, nothing otherwise.
fn existing(id: i64) -> std::sync::Arc<RecordingExecutor> {
    RecordingExecutor::new(move |stmt, params| {
        if stmt == catalog::SELECT_BY_ID && params.first() == Some(&Value::Int(id)) {
            Ok(vec![john_doe_row(id)])
        } else {
            Ok(Vec::new())
        }
    })
}

// createTable

#[tokio::test]
async fn test_create_table() {
    let exec = RecordingExecutor::returning(Vec::new());
    let service = service_with(&exec);

    assert_eq!(service.create_table().await.unwrap(), "table created successfully");
    assert_eq!(exec.statements(), vec![catalog::CREATE_TABLE.to_string()]);
}

#[tokio::test]
async fn test_create_table_propagates_store_failure() {
    let exec = RecordingExecutor::new(|_, _| Err(StoreError::Connection("refused".into())));
    let service = service_with(&exec);

    let err = service.create_table().await.unwrap_err();
    assert!(matches!(err, VisitorError::Store(StoreError::Connection(_))));
}

// addVisitor

#[tokio::test]
async fn test_add_visitor_binds_values_in_schema_order() {
    let exec = RecordingExecutor::returning(vec![Row::new().with("id", 1)]);
    let service = service_with(&exec);

    let created = service.add_visitor(&mock_visitor()).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.to_string(), "Visitor added with ID: 1");

    let calls = exec.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("INSERT INTO visitors"));
    assert_eq!(
        calls[0].1,
        vec![
            Value::from("John Doe"),
            Value::Int(30),
            Value::Date(NaiveDate::from_ymd_opt(2024, 4, 12).unwrap()),
            Value::Time(NaiveTime::from_hms_opt(10, 30, 0).unwrap()),
            Value::from("Jane Smith"),
            Value::from("Interested in learning about Docker."),
        ]
    );
}

#[tokio::test]
async fn test_add_visitor_validation_errors_skip_store() {
    let exec = RecordingExecutor::returning(vec![Row::new().with("id", 1)]);
    let service = service_with(&exec);

    let mut visitor = mock_visitor();
    visitor.full_name = "JohnDoe".to_string();
    assert!(matches!(
        service.add_visitor(&visitor).await,
        Err(VisitorError::InvalidName)
    ));

    let mut visitor = mock_visitor();
    visitor.visitor_age = -1;
    assert!(matches!(
        service.add_visitor(&visitor).await,
        Err(VisitorError::InvalidAge)
    ));

    let mut visitor = mock_visitor();
    visitor.date_of_visit = "122/12/2001".to_string();
    assert!(matches!(
        service.add_visitor(&visitor).await,
        Err(VisitorError::InvalidDate)
    ));

    let mut visitor = mock_visitor();
    visitor.time_of_visit = "1222:12".to_string();
    assert!(matches!(
        service.add_visitor(&visitor).await,
        Err(VisitorError::InvalidTime)
    ));

    assert!(exec.calls().is_empty());
}

#[tokio::test]
async fn test_add_visitor_without_returned_row_is_store_failure() {
    let exec = RecordingExecutor::returning(Vec::new());
    let service = service_with(&exec);

    let err = service.add_visitor(&mock_visitor()).await.unwrap_err();
    assert!(matches!(err, VisitorError::Store(StoreError::MissingColumn(_))));
}

#[tokio::test]
async fn test_add_visitor_record_reports_mistyped_field() {
    let exec = RecordingExecutor::returning(vec![Row::new().with("id", 1)]);
    let service = service_with(&exec);

    let mut record = mock_visitor().to_record();
    record.insert("visitor_age".to_string(), json!("12"));
    assert!(matches!(
        service.add_visitor_record(&record).await,
        Err(VisitorError::InvalidAge)
    ));
    assert!(exec.calls().is_empty());
}

#[tokio::test]
async fn test_add_visitor_record_binds_like_typed_visitor() {
    let exec = RecordingExecutor::returning(vec![Row::new().with("id", 4)]);
    let service = service_with(&exec);

    let created = service
        .add_visitor_record(&mock_visitor().to_record())
        .await
        .unwrap();
    service.add_visitor(&mock_visitor()).await.unwrap();

    assert_eq!(created.id, 4);
    let calls = exec.calls();
    assert_eq!(calls[0], calls[1]);
}

// listVisitors

#[tokio::test]
async fn test_list_visitors_returns_store_rows() {
    let rows = vec![Row::new().with("id", 1).with("full_name", "testUser")];
    let exec = RecordingExecutor::returning(rows.clone());
    let service = service_with(&exec);

    assert_eq!(service.list_visitors().await.unwrap(), rows);
    assert_eq!(exec.statements(), vec![catalog::SELECT_ALL_SUMMARY.to_string()]);
}

#[tokio::test]
async fn test_list_visitors_empty_is_ok() {
    let exec = RecordingExecutor::returning(Vec::new());
    let service = service_with(&exec);
    assert!(service.list_visitors().await.unwrap().is_empty());
}

// viewVisitor

#[tokio::test]
async fn test_view_visitor_normalizes_date() {
    let exec = existing(3);
    let service = service_with(&exec);

    let rows = service.view_visitor(3).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("date_of_visit"), Some(&Value::from("2024-04-12")));
    assert_eq!(rows[0].get("full_name"), Some(&Value::from("John Doe")));
    assert_eq!(exec.calls()[0].1, vec![Value::Int(3)]);
}

#[tokio::test]
async fn test_view_visitor_not_found() {
    let exec = existing(3);
    let service = service_with(&exec);
    assert!(matches!(
        service.view_visitor(4).await,
        Err(VisitorError::NotFound)
    ));
}

#[tokio::test]
async fn test_view_visitor_invalid_id_skips_store() {
    let exec = existing(3);
    let service = service_with(&exec);
    assert!(matches!(
        service.view_visitor(0).await,
        Err(VisitorError::InvalidId)
    ));
    assert!(exec.calls().is_empty());
}

// deleteVisitor

#[tokio::test]
async fn test_delete_visitor_probes_then_deletes_once() {
    let exec = existing(1);
    let service = service_with(&exec);

    let deleted = service.delete_visitor(1).await.unwrap();
    assert_eq!(deleted.to_string(), "Visitor with ID: 1, has been deleted");

    let calls = exec.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, catalog::SELECT_BY_ID);
    assert_eq!(calls[1], (catalog::DELETE_BY_ID.to_string(), vec![Value::Int(1)]));
}

#[tokio::test]
async fn test_delete_visitor_missing_id_issues_no_delete() {
    let exec = existing(1);
    let service = service_with(&exec);

    assert!(matches!(
        service.delete_visitor(2).await,
        Err(VisitorError::NotFound)
    ));
    assert_eq!(exec.count_matching("DELETE"), 0);
}

#[tokio::test]
async fn test_delete_visitor_requires_valid_id() {
    let exec = existing(1);
    let service = service_with(&exec);
    assert!(matches!(
        service.delete_visitor(-1).await,
        Err(VisitorError::InvalidId)
    ));
    assert!(exec.calls().is_empty());
}

// updateVisitor

#[tokio::test]
async fn test_update_visitor_binds_value_then_id() {
    let exec = existing(1);
    let service = service_with(&exec);

    let updated = service
        .update_visitor(1, "full_name", &json!("Johnny Doe"))
        .await
        .unwrap();
    assert_eq!(updated.id, 1);

    let calls = exec.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        (
            "UPDATE visitors SET full_name = $1 WHERE id = $2".to_string(),
            vec![Value::from("Johnny Doe"), Value::Int(1)]
        )
    );
}

#[tokio::test]
async fn test_update_visitor_unknown_column() {
    let exec = existing(1);
    let service = service_with(&exec);

    let err = service
        .update_visitor(1, "favourite_colour", &json!("blue"))
        .await
        .unwrap_err();
    assert!(matches!(err, VisitorError::UnknownColumn(ref c) if c == "favourite_colour"));
    assert_eq!(exec.count_matching("UPDATE"), 0);
}

#[tokio::test]
async fn test_update_visitor_validates_before_probe() {
    let exec = existing(1);
    let service = service_with(&exec);

    assert!(matches!(
        service.update_visitor(1, "visitor_age", &json!("12")).await,
        Err(VisitorError::InvalidAge)
    ));
    assert!(matches!(
        service.update_visitor(1, "time_of_visit", &json!("25:00")).await,
        Err(VisitorError::InvalidTime)
    ));
    assert!(exec.calls().is_empty());
}

#[tokio::test]
async fn test_update_visitor_missing_row_wins_over_unknown_column() {
    let exec = existing(1);
    let service = service_with(&exec);

    assert!(matches!(
        service.update_visitor(9, "favourite_colour", &json!("blue")).await,
        Err(VisitorError::NotFound)
    ));
}

// deleteAllVisitors

#[tokio::test]
async fn test_delete_all_on_empty_table() {
    let exec = RecordingExecutor::returning(Vec::new());
    let service = service_with(&exec);

    assert!(matches!(
        service.delete_all_visitors().await,
        Err(VisitorError::NoVisitors)
    ));
    assert_eq!(exec.statements(), vec![catalog::SELECT_ALL_SUMMARY.to_string()]);
}

#[tokio::test]
async fn test_delete_all_issues_single_delete() {
    let exec = RecordingExecutor::new(|stmt, _| {
        if stmt == catalog::SELECT_ALL_SUMMARY {
            Ok(vec![Row::new().with("id", 1).with("full_name", "John Doe")])
        } else {
            Ok(Vec::new())
        }
    });
    let service = service_with(&exec);

    assert_eq!(service.delete_all_visitors().await.unwrap(), "all visitors deleted");
    assert_eq!(exec.count_matching(catalog::DELETE_ALL), 1);
}

// viewLastVisitor

#[tokio::test]
async fn test_view_last_visitor_returns_id() {
    let exec = RecordingExecutor::returning(vec![Row::new().with("id", 10)]);
    let service = service_with(&exec);

    assert_eq!(service.view_last_visitor().await.unwrap(), 10);
    assert_eq!(exec.statements(), vec![catalog::SELECT_MOST_RECENT_ID.to_string()]);
}

#[tokio::test]
async fn test_view_last_visitor_empty_table() {
    let exec = RecordingExecutor::returning(Vec::new());
    let service = service_with(&exec);
    assert!(matches!(
        service.view_last_visitor().await,
        Err(VisitorError::NotFound)
    ));
}
