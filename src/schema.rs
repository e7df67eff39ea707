use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use prettytable::{format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR, row, Table};

use crate::descriptor::{Record, RecordDescriptor, TypeKind};
use crate::error::MappingError;
use crate::mapper::{sql_type_for, SqlType};
use crate::query;

/// Terminal field of a flattened record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Qualified name: field names from the root joined with `_`.
    pub name: String,
    pub sql_type: SqlType,
    /// Field names from the root record to the terminal field.
    pub path: Vec<&'static str>,
}

/// Columns of a record in depth-first declaration order.
pub type FlatSchema = Vec<Column>;

/// Flattens `record` into its terminal columns.
///
/// Nested and pointed-to records are spliced in where they are declared,
/// with their field names prefixed by the path leading to them.
pub fn flatten(record: &RecordDescriptor) -> Result<FlatSchema, MappingError> {
    let mut columns = Vec::new();
    flatten_into(record, "", &mut Vec::new(), &mut Vec::new(), &mut columns)?;

    let mut names = HashSet::with_capacity(columns.len());
    for column in &columns {
        if !names.insert(column.name.as_str()) {
            return Err(MappingError::DuplicateColumn {
                column: column.name.clone(),
            });
        }
    }

    tracing::debug!("Flattened `{}` into {} columns", record.name, columns.len());
    Ok(columns)
}

/// Appends the columns of `record` to `out` and returns how many of them are
/// required, that is reached without passing through an `Option`.
///
/// An optional sub-record needs at least one required column. Otherwise a
/// present sub-record would read back as absent.
fn flatten_into(
    record: &RecordDescriptor,
    prefix: &str,
    path: &mut Vec<&'static str>,
    ancestors: &mut Vec<&'static str>,
    out: &mut FlatSchema,
) -> Result<usize, MappingError> {
    if ancestors.contains(&record.type_name) {
        return Err(MappingError::RecursiveRecord {
            record: record.name.to_string(),
        });
    }
    ancestors.push(record.type_name);

    let mut required = 0;
    for field in (record.fields)() {
        path.push(field.name);
        match field.ty.resolve_optional() {
            (TypeKind::Record(nested), optional) => {
                let nested_prefix = format!("{}{}_", prefix, field.name);
                let nested_required =
                    flatten_into(&nested, &nested_prefix, path, ancestors, out)?;
                if !optional {
                    required += nested_required;
                } else if nested_required == 0 {
                    return Err(MappingError::NullableRecord {
                        field: format!("{}{}", prefix, field.name),
                    });
                }
            }
            (TypeKind::Scalar(native), optional) => {
                let name = format!("{}{}", prefix, field.name);
                let sql_type = sql_type_for(native).ok_or_else(|| {
                    MappingError::UnsupportedType {
                        column: name.clone(),
                        native: native.to_string(),
                    }
                })?;
                tracing::trace!("Column `{}` {} from `{}`", name, sql_type, native);
                out.push(Column {
                    name,
                    sql_type,
                    path: path.clone(),
                });
                if !optional {
                    required += 1;
                }
            }
        }
        path.pop();
    }

    ancestors.pop();
    Ok(required)
}

/// Flattened table of one record type. Derived per call, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: FlatSchema,
    /// Column declared as key on the record, if any.
    pub key: Option<String>,
}

impl TableSchema {
    pub fn of<R: Record>() -> Result<Self, MappingError> {
        Self::from_descriptor(&R::descriptor())
    }

    /// Flattens `record`, rejecting records without columns.
    pub fn from_descriptor(record: &RecordDescriptor) -> Result<Self, MappingError> {
        let columns = flatten(record)?;
        if columns.is_empty() {
            return Err(MappingError::EmptySchema {
                record: record.name.to_string(),
            });
        }

        Ok(Self {
            table_name: record.name.to_string(),
            columns,
            key: record.key.map(str::to_string),
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn create_table_sql(&self) -> Result<String, MappingError> {
        query::create_table_sql(&self.table_name, &self.columns)
    }

    pub fn insert_sql(&self) -> Result<(String, usize), MappingError> {
        query::insert_sql(&self.table_name, &self.columns)
    }

    pub fn select_by_key_sql(&self, key: &str) -> Result<String, MappingError> {
        query::select_by_key_sql(&self.table_name, &self.columns, key)
    }

    pub fn select_all_sql(&self) -> Result<String, MappingError> {
        query::select_all_sql(&self.table_name, &self.columns)
    }
}

impl Display for TableSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table: {}", self.table_name)?;

        let mut table = Table::new();
        table.set_format(*FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(row!["#", "Column", "Type", "Key"]);
        for (i, column) in self.columns.iter().enumerate() {
            let key = if self.key.as_deref() == Some(column.name.as_str()) {
                "*"
            } else {
                ""
            };
            table.add_row(row![i, column.name, column.sql_type.to_string(), key]);
        }

        let mut buffer = Vec::new();
        table.print(&mut buffer).map_err(|_| fmt::Error)?;
        let table_str = String::from_utf8(buffer).map_err(|_| fmt::Error)?;
        writeln!(f, "{}", table_str.trim_end())
    }
}
