//! SQL text for a flattened schema.
//!
//! Table and column names are written verbatim. Nothing is quoted or
//! escaped, so names that clash with SQL keywords are the caller's problem.
//! Values never appear in the text: every statement that takes values uses
//! `?` placeholders in schema order.

use std::fmt::Write as _;

use crate::error::MappingError;
use crate::schema::Column;

fn ensure_columns(table: &str, schema: &[Column]) -> Result<(), MappingError> {
    if schema.is_empty() {
        return Err(MappingError::EmptySchema {
            record: table.to_string(),
        });
    }
    Ok(())
}

fn column_list(schema: &[Column]) -> String {
    schema
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// `create table <table> (...)` with one line per column.
pub fn create_table_sql(table: &str, schema: &[Column]) -> Result<String, MappingError> {
    ensure_columns(table, schema)?;

    let mut sql = format!("create table {} (\n", table);
    for column in schema {
        // writing into a String cannot fail
        let _ = writeln!(sql, "    {} {},", column.name, column.sql_type);
    }
    if sql.ends_with(",\n") {
        sql.truncate(sql.len() - 2);
    }
    sql.push_str("\n)\n");

    Ok(sql)
}

/// Parameterized insert of a whole row. Returns the statement and its
/// placeholder count, which always equals the column count.
pub fn insert_sql(table: &str, schema: &[Column]) -> Result<(String, usize), MappingError> {
    ensure_columns(table, schema)?;

    let placeholders = vec!["?"; schema.len()].join(",");
    let sql = format!(
        "insert into {} ({}) values ({})",
        table,
        column_list(schema),
        placeholders
    );

    Ok((sql, schema.len()))
}

/// Selects every column of the rows whose `key` equals the single parameter.
pub fn select_by_key_sql(
    table: &str,
    schema: &[Column],
    key: &str,
) -> Result<String, MappingError> {
    ensure_columns(table, schema)?;
    if !schema.iter().any(|c| c.name == key) {
        return Err(MappingError::UnknownKeyColumn {
            table: table.to_string(),
            column: key.to_string(),
        });
    }

    Ok(format!(
        "select {} from {} where {} = ?",
        column_list(schema),
        table,
        key
    ))
}

pub fn select_all_sql(table: &str, schema: &[Column]) -> Result<String, MappingError> {
    ensure_columns(table, schema)?;

    Ok(format!("select {} from {}", column_list(schema), table))
}
