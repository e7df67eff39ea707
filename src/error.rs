use std::error::Error as StdError;

use derive_more::{Display, Error, From};

use crate::mapper::SqlType;
use crate::value::Value;

/// Failure while deriving a schema from a record type or while moving values
/// between a record and a row.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum MappingError {
    #[display("column `{column}` has unsupported type `{native}`")]
    UnsupportedType { column: String, native: String },
    #[display("record `{record}` has no columns")]
    EmptySchema { record: String },
    #[display("record `{record}` contains itself")]
    RecursiveRecord { record: String },
    #[display("column `{column}` is declared more than once")]
    DuplicateColumn { column: String },
    #[display("optional record `{field}` has no non-optional column")]
    NullableRecord { field: String },
    #[display("table `{table}` has no key column `{column}`")]
    UnknownKeyColumn { table: String, column: String },
    #[display("column `{column}` does not match the record: {reason}")]
    SchemaInstanceMismatch {
        column: String,
        #[error(source)]
        reason: AccessError,
    },
}

/// Failure while resolving a field path on a record value.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum AccessError {
    #[display("`{record}` has no field `{field}`")]
    NoSuchField { record: &'static str, field: String },
    #[display("`{record}` is a record, not a scalar")]
    NotScalar { record: &'static str },
    #[display("`{native}` is a scalar and has no field `{field}`")]
    NotRecord { native: &'static str, field: String },
    #[display("`{native}` expects {expected}, got {found}")]
    TypeMismatch {
        native: &'static str,
        expected: &'static str,
        found: Value,
    },
    #[display("{expected} column got {found}")]
    ColumnType { expected: SqlType, found: Value },
    #[display("{value} is not a finite real")]
    NonFinite { value: f64 },
    #[display("{value} does not fit into `{native}`")]
    OutOfRange { native: &'static str, value: i64 },
    #[display("`{native}` has no column mapping")]
    Unmapped { native: &'static str },
    #[display("row has {found} values for {expected} columns")]
    RowLength { expected: usize, found: usize },
}

/// The engine rejected a statement. Wraps the engine's own error.
#[derive(Debug, Display)]
#[display("failed to execute `{statement}`: {source}")]
pub struct ExecutionError {
    pub statement: String,
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl ExecutionError {
    pub fn new(
        statement: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            statement: statement.into(),
            source: source.into(),
        }
    }

    /// Engine error as produced by the engine, for downcasting.
    pub fn engine_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

impl StdError for ExecutionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display("{_0}")]
    Mapping(MappingError),
    #[display("{_0}")]
    Execution(ExecutionError),
}
