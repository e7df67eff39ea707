mod sqlite;

pub use sqlite::SqliteEngine;

use crate::error::ExecutionError;
use crate::value::Value;

/// Statement executor the store delegates to.
///
/// Parameters bind to `?` placeholders in order. Rows come back as values in
/// the order of the selected columns.
pub trait SqlEngine {
    /// Runs a statement that returns no rows. Returns the affected row count.
    fn execute(&self, statement: &str, params: &[Value]) -> Result<usize, ExecutionError>;

    fn query(&self, statement: &str, params: &[Value]) -> Result<Vec<Vec<Value>>, ExecutionError>;
}

impl<E: SqlEngine + ?Sized> SqlEngine for &E {
    fn execute(&self, statement: &str, params: &[Value]) -> Result<usize, ExecutionError> {
        (**self).execute(statement, params)
    }

    fn query(&self, statement: &str, params: &[Value]) -> Result<Vec<Vec<Value>>, ExecutionError> {
        (**self).query(statement, params)
    }
}
