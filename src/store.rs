use crate::binder::{extract_values, materialize};
use crate::descriptor::Record;
use crate::engine::SqlEngine;
use crate::error::{MappingError, StoreError};
use crate::schema::TableSchema;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key column used by [`RecordStore::read_by_key`] for records that do
    /// not mark a key field themselves.
    pub key_column: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_column: "id".to_string(),
        }
    }
}

/// Creates tables for records, inserts them and reads them back through an
/// engine owned by the caller.
///
/// The store keeps no state besides its config. Schemas are derived again on
/// every call.
#[derive(Debug)]
pub struct RecordStore<'e, E: ?Sized> {
    engine: &'e E,
    config: StoreConfig,
}

impl<'e, E: SqlEngine + ?Sized> RecordStore<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        Self::with_config(engine, StoreConfig::default())
    }

    pub fn with_config(engine: &'e E, config: StoreConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn schema<R: Record>(&self) -> Result<TableSchema, MappingError> {
        TableSchema::of::<R>()
    }

    /// Creates the table of `R` and returns its schema.
    pub fn create_table<R: Record>(&self) -> Result<TableSchema, StoreError> {
        let schema = TableSchema::of::<R>()?;
        let sql = schema.create_table_sql()?;

        tracing::debug!("Creating table `{}` with {} columns", schema.table_name, schema.len());
        self.engine.execute(&sql, &[])?;

        Ok(schema)
    }

    /// Inserts `record` as one row. Returns the affected row count.
    pub fn insert<R: Record>(&self, record: &R) -> Result<usize, StoreError> {
        let schema = TableSchema::of::<R>()?;
        let (sql, _) = schema.insert_sql()?;
        let values = extract_values(record, &schema.columns)?;

        tracing::debug!("Inserting into `{}`: {}", schema.table_name, sql);
        Ok(self.engine.execute(&sql, &values)?)
    }

    /// Reads the first row whose key column equals `key`.
    ///
    /// The key column is the field marked `#[record(key)]`, or the configured
    /// [`StoreConfig::key_column`] otherwise.
    pub fn read_by_key<R: Record>(&self, key: impl Into<Value>) -> Result<Option<R>, StoreError> {
        let schema = TableSchema::of::<R>()?;
        let key_column = self.key_column(&schema);
        let sql = schema.select_by_key_sql(key_column)?;

        tracing::debug!("Reading `{}` by `{}`", schema.table_name, key_column);
        let rows = self.engine.query(&sql, &[key.into()])?;
        if rows.len() > 1 {
            tracing::warn!(
                "{} rows in `{}` share one key, using the first",
                rows.len(),
                schema.table_name
            );
        }

        match rows.into_iter().next() {
            Some(row) => {
                let mut record = R::default();
                materialize(row, &schema.columns, &mut record)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Reads every row of the table of `R`, in the order the engine returns
    /// them.
    pub fn read_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let schema = TableSchema::of::<R>()?;
        let sql = schema.select_all_sql()?;

        tracing::debug!("Reading all of `{}`", schema.table_name);
        self.engine
            .query(&sql, &[])?
            .into_iter()
            .map(|row| {
                let mut record = R::default();
                materialize(row, &schema.columns, &mut record)?;
                Ok(record)
            })
            .collect()
    }

    fn key_column<'s>(&'s self, schema: &'s TableSchema) -> &'s str {
        schema.key.as_deref().unwrap_or(self.config.key_column.as_str())
    }
}
