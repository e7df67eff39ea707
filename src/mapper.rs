use derive_more::Display;

/// Column type of a terminal field.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    #[display("TEXT")]
    Text,
    #[display("INTEGER")]
    Integer,
    #[display("REAL")]
    Real,
}

/// Maps a native scalar type name to its column type.
///
/// Returns `None` for types without a mapping. Callers turn that into
/// [`MappingError::UnsupportedType`](crate::MappingError::UnsupportedType);
/// there is no fallback type. `u64` and `usize` are left out on purpose as
/// they do not fit into a signed 64-bit column.
pub fn sql_type_for(native: &str) -> Option<SqlType> {
    match native {
        "String" => Some(SqlType::Text),
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => Some(SqlType::Integer),
        "f32" | "f64" => Some(SqlType::Real),
        _ => None,
    }
}
