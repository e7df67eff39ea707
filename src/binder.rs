use crate::descriptor::Field;
use crate::error::{AccessError, MappingError};
use crate::mapper::SqlType;
use crate::schema::Column;
use crate::value::Value;

fn mismatch(column: &Column, reason: AccessError) -> MappingError {
    MappingError::SchemaInstanceMismatch {
        column: column.name.clone(),
        reason,
    }
}

/// Checks that `value` can be stored in `column`. `Null` fits every column
/// and integers fit real columns.
fn check_column_type(column: &Column, value: &Value) -> Result<(), MappingError> {
    match (value.sql_type(), column.sql_type) {
        (None, _) | (Some(SqlType::Integer), SqlType::Real) => Ok(()),
        (Some(found), expected) if found == expected => Ok(()),
        _ => Err(mismatch(
            column,
            AccessError::ColumnType {
                expected: column.sql_type,
                found: value.clone(),
            },
        )),
    }
}

/// Reads one value per column from `record`, in schema order.
///
/// Non-finite reals are rejected: SQLite stores NaN as `NULL`.
pub fn extract_values<R: Field>(record: &R, schema: &[Column]) -> Result<Vec<Value>, MappingError> {
    schema
        .iter()
        .map(|column| {
            let value = record
                .read(&column.path)
                .map_err(|reason| mismatch(column, reason))?;
            match value {
                Value::Float(v) if !v.is_finite() => {
                    Err(mismatch(column, AccessError::NonFinite { value: v }))
                }
                value if value.sql_type().is_some_and(|t| t != column.sql_type) => Err(mismatch(
                    column,
                    AccessError::ColumnType {
                        expected: column.sql_type,
                        found: value,
                    },
                )),
                value => Ok(value),
            }
        })
        .collect()
}

/// Writes `row` into `target`, value `i` going to the field of column `i`.
///
/// The row is written into a fresh `R::default()` that replaces `target`
/// only once every value was written. On error `target` is left untouched.
pub fn materialize<R: Field + Default>(
    row: Vec<Value>,
    schema: &[Column],
    target: &mut R,
) -> Result<(), MappingError> {
    if row.len() != schema.len() {
        let column = schema
            .get(row.len().min(schema.len().saturating_sub(1)))
            .map(|c| c.name.clone())
            .unwrap_or_default();
        return Err(MappingError::SchemaInstanceMismatch {
            column,
            reason: AccessError::RowLength {
                expected: schema.len(),
                found: row.len(),
            },
        });
    }
    for (column, value) in schema.iter().zip(&row) {
        check_column_type(column, value)?;
    }

    let mut record = R::default();
    for (column, value) in schema.iter().zip(row) {
        record
            .write(&column.path, value)
            .map_err(|reason| mismatch(column, reason))?;
    }
    *target = record;

    Ok(())
}
