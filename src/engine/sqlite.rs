use std::path::Path;

use parking_lot::Mutex;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};

use crate::engine::SqlEngine;
use crate::error::ExecutionError;
use crate::value::Value;

/// [`SqlEngine`] over a single SQLite connection.
///
/// The connection sits behind a mutex so one engine can be shared between
/// threads. Statements run one at a time.
#[derive(Debug)]
pub struct SqliteEngine {
    connection: Mutex<Connection>,
}

impl SqliteEngine {
    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    pub fn into_connection(self) -> Connection {
        self.connection.into_inner()
    }
}

impl SqlEngine for SqliteEngine {
    fn execute(&self, statement: &str, params: &[Value]) -> Result<usize, ExecutionError> {
        let connection = self.connection.lock();
        connection
            .execute(statement, params_from_iter(params.iter()))
            .map_err(|e| ExecutionError::new(statement, e))
    }

    fn query(&self, statement: &str, params: &[Value]) -> Result<Vec<Vec<Value>>, ExecutionError> {
        let connection = self.connection.lock();
        let mut prepared = connection
            .prepare(statement)
            .map_err(|e| ExecutionError::new(statement, e))?;
        let width = prepared.column_count();

        let rows = prepared
            .query_map(params_from_iter(params.iter()), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|e| ExecutionError::new(statement, e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ExecutionError::new(statement, e))?;

        Ok(rows)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Int(x) => ToSqlOutput::Borrowed(ValueRef::Integer(*x)),
            Value::String(x) => ToSqlOutput::Borrowed(ValueRef::Text(x.as_bytes())),
            Value::Float(x) => ToSqlOutput::Borrowed(ValueRef::Real(*x)),
        })
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Value::Null),
            ValueRef::Integer(x) => Ok(Value::Int(x)),
            ValueRef::Real(x) => Ok(Value::Float(x)),
            ValueRef::Text(x) => std::str::from_utf8(x)
                .map(|s| Value::String(s.to_string()))
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}
