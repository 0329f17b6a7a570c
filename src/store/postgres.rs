//! PostgreSQL executor backed by a single `tokio-postgres` client.
//!
//! The client pipelines concurrent queries over one connection, so a single
//! executor can be shared by every request handler.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tokio::task::JoinHandle;
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error, info};

use super::{QueryExecutor, Row, StoreError, StoreResult, Value};

pub struct PgExecutor {
    client: Client,
    connection_task: JoinHandle<()>,
}

impl PgExecutor {
    /// Connect using a libpq-style connection string, e.g.
    /// `host=localhost user=postgres dbname=visitors`.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let connection_task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "postgres_connection_closed");
            }
        });
        info!("postgres_connected");

        Ok(Self {
            client,
            connection_task,
        })
    }
}

impl Drop for PgExecutor {
    fn drop(&mut self) {
        self.connection_task.abort();
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn query(&self, statement: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        let prepared = self.client.prepare(statement).await?;
        let expected = prepared.params();
        if expected.len() != params.len() {
            return Err(StoreError::Conversion(format!(
                "statement expects {} parameters, got {}",
                expected.len(),
                params.len()
            )));
        }

        let bound = params
            .iter()
            .zip(expected)
            .map(|(value, ty)| bind_param(value, ty))
            .collect::<StoreResult<Vec<_>>>()?;
        let refs: Vec<&(dyn ToSql + Sync)> = bound
            .iter()
            .map(|b| &**b as &(dyn ToSql + Sync))
            .collect();

        let rows = self.client.query(&prepared, &refs).await?;
        debug!(params = params.len(), rows = rows.len(), "postgres_query");

        rows.iter().map(decode_row).collect()
    }
}

/// Convert a [`Value`] into the Rust type the driver expects for `ty`.
///
/// Integers are narrowed to the column width since the driver refuses to bind
/// an `i64` to an `INT4` parameter.
fn bind_param(value: &Value, ty: &Type) -> StoreResult<Box<dyn ToSql + Sync + Send>> {
    let out_of_range = |v: i64| StoreError::Conversion(format!("{v} out of range for {ty}"));

    let param: Box<dyn ToSql + Sync + Send> = match value {
        Value::Null => match *ty {
            Type::INT2 => Box::new(None::<i16>),
            Type::INT4 => Box::new(None::<i32>),
            Type::INT8 => Box::new(None::<i64>),
            Type::DATE => Box::new(None::<NaiveDate>),
            Type::TIME => Box::new(None::<NaiveTime>),
            Type::TIMESTAMP => Box::new(None::<NaiveDateTime>),
            _ => Box::new(None::<String>),
        },
        Value::Int(v) => match *ty {
            Type::INT2 => Box::new(i16::try_from(*v).map_err(|_| out_of_range(*v))?),
            Type::INT4 => Box::new(i32::try_from(*v).map_err(|_| out_of_range(*v))?),
            _ => Box::new(*v),
        },
        Value::Text(s) => Box::new(s.clone()),
        Value::Date(d) => Box::new(*d),
        Value::Time(t) => Box::new(*t),
        Value::Timestamp(ts) => Box::new(*ts),
    };
    Ok(param)
}

fn decode_row(row: &tokio_postgres::Row) -> StoreResult<Row> {
    let mut out = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let value = match *column.type_() {
            Type::INT2 => row.try_get::<_, Option<i16>>(idx)?.map(|v| Value::Int(v.into())),
            Type::INT4 => row.try_get::<_, Option<i32>>(idx)?.map(|v| Value::Int(v.into())),
            Type::INT8 => row.try_get::<_, Option<i64>>(idx)?.map(Value::Int),
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                row.try_get::<_, Option<String>>(idx)?.map(Value::Text)
            }
            Type::DATE => row.try_get::<_, Option<NaiveDate>>(idx)?.map(Value::Date),
            Type::TIME => row.try_get::<_, Option<NaiveTime>>(idx)?.map(Value::Time),
            Type::TIMESTAMP => row
                .try_get::<_, Option<NaiveDateTime>>(idx)?
                .map(Value::Timestamp),
            Type::TIMESTAMPTZ => row
                .try_get::<_, Option<DateTime<Utc>>>(idx)?
                .map(|ts| Value::Timestamp(ts.naive_utc())),
            ref other => {
                return Err(StoreError::Conversion(format!(
                    "unsupported type {other} for column '{}'",
                    column.name()
                )))
            }
        };
        out.set(column.name(), value.unwrap_or(Value::Null));
    }
    Ok(out)
}
