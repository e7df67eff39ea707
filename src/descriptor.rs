use crate::error::AccessError;
use crate::mapper::{sql_type_for, SqlType};
use crate::value::Value;

/// Static shape of a field's type, as seen by the flattener.
#[derive(Debug, Clone, Copy)]
pub enum TypeDescriptor {
    /// Terminal type, identified by its native type name.
    Scalar(&'static str),
    /// Indirection (`Box<T>`) to the described type.
    Pointer(fn() -> TypeDescriptor),
    /// Indirection that may be absent (`Option<T>`). Absence reads as `Null`
    /// in every column below it.
    Optional(fn() -> TypeDescriptor),
    /// Composite type whose fields are flattened into the parent.
    Record(RecordDescriptor),
}

/// [`TypeDescriptor`] with all indirection removed.
#[derive(Debug, Clone, Copy)]
pub enum TypeKind {
    Scalar(&'static str),
    Record(RecordDescriptor),
}

impl TypeDescriptor {
    /// Follows pointers until a scalar or a record type is reached.
    pub fn resolve(self) -> TypeKind {
        self.resolve_optional().0
    }

    /// Like [`resolve`](Self::resolve), also telling whether an `Optional`
    /// was passed on the way.
    pub fn resolve_optional(self) -> (TypeKind, bool) {
        let mut ty = self;
        let mut optional = false;
        loop {
            match ty {
                TypeDescriptor::Pointer(inner) => ty = inner(),
                TypeDescriptor::Optional(inner) => {
                    optional = true;
                    ty = inner();
                }
                TypeDescriptor::Scalar(native) => return (TypeKind::Scalar(native), optional),
                TypeDescriptor::Record(record) => return (TypeKind::Record(record), optional),
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecordDescriptor {
    /// Table name of the record.
    pub name: &'static str,
    /// Fully qualified type name. Identifies the record while flattening.
    pub type_name: &'static str,
    /// Field marked as the lookup key, if any.
    pub key: Option<&'static str>,
    /// Declared fields in declaration order. Produced lazily, so records
    /// that refer to themselves can still be described.
    pub fields: fn() -> Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub ty: TypeDescriptor,
}

impl FieldDescriptor {
    pub fn is_nested(&self) -> bool {
        matches!(self.ty.resolve(), TypeKind::Record(_))
    }

    /// Column type of a terminal field. `None` for nested fields and for
    /// scalars without a mapping.
    pub fn scalar_type(&self) -> Option<SqlType> {
        match self.ty.resolve() {
            TypeKind::Scalar(native) => sql_type_for(native),
            TypeKind::Record(_) => None,
        }
    }
}

/// A type that can appear as a field of a [`Record`].
///
/// `path` is the list of field names below `self` leading to a terminal
/// scalar. An empty path addresses `self`.
pub trait Field {
    fn type_descriptor() -> TypeDescriptor;

    fn read(&self, path: &[&str]) -> Result<Value, AccessError>;

    fn write(&mut self, path: &[&str], value: Value) -> Result<(), AccessError>;
}

/// A struct that maps to a table. Usually implemented with
/// `#[derive(Record)]`.
pub trait Record: Field + Default {
    fn descriptor() -> RecordDescriptor;
}

fn expect_leaf(path: &[&str], native: &'static str) -> Result<(), AccessError> {
    match path.first() {
        Some(field) => Err(AccessError::NotRecord {
            native,
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}

macro_rules! impl_integer_field {
    ($($ty:ty),*) => {
        $(
            impl Field for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::Scalar(stringify!($ty))
                }

                fn read(&self, path: &[&str]) -> Result<Value, AccessError> {
                    expect_leaf(path, stringify!($ty))?;
                    Ok(Value::Int(i64::from(*self)))
                }

                fn write(&mut self, path: &[&str], value: Value) -> Result<(), AccessError> {
                    expect_leaf(path, stringify!($ty))?;
                    match value {
                        Value::Int(v) => {
                            *self = <$ty>::try_from(v).map_err(|_| AccessError::OutOfRange {
                                native: stringify!($ty),
                                value: v,
                            })?;
                            Ok(())
                        }
                        found => Err(AccessError::TypeMismatch {
                            native: stringify!($ty),
                            expected: "an integer",
                            found,
                        }),
                    }
                }
            }
        )*
    };
}

macro_rules! impl_float_field {
    ($($ty:ty),*) => {
        $(
            impl Field for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::Scalar(stringify!($ty))
                }

                fn read(&self, path: &[&str]) -> Result<Value, AccessError> {
                    expect_leaf(path, stringify!($ty))?;
                    Ok(Value::Float(f64::from(*self)))
                }

                fn write(&mut self, path: &[&str], value: Value) -> Result<(), AccessError> {
                    expect_leaf(path, stringify!($ty))?;
                    match value {
                        Value::Float(v) => *self = v as $ty,
                        // integral reals may come back as integers
                        Value::Int(v) => *self = v as $ty,
                        found => {
                            return Err(AccessError::TypeMismatch {
                                native: stringify!($ty),
                                expected: "a real",
                                found,
                            })
                        }
                    }
                    Ok(())
                }
            }
        )*
    };
}

/// Types that describe themselves but have no column mapping. Flattening a
/// record with such a field fails with `UnsupportedType`.
macro_rules! impl_unmapped_field {
    ($($ty:ty),*) => {
        $(
            impl Field for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::Scalar(stringify!($ty))
                }

                fn read(&self, _: &[&str]) -> Result<Value, AccessError> {
                    Err(AccessError::Unmapped { native: stringify!($ty) })
                }

                fn write(&mut self, _: &[&str], _: Value) -> Result<(), AccessError> {
                    Err(AccessError::Unmapped { native: stringify!($ty) })
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, u8, u16, u32);
impl_float_field!(f32, f64);
impl_unmapped_field!(bool, char, u64, usize);

impl Field for String {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar("String")
    }

    fn read(&self, path: &[&str]) -> Result<Value, AccessError> {
        expect_leaf(path, "String")?;
        Ok(Value::String(self.clone()))
    }

    fn write(&mut self, path: &[&str], value: Value) -> Result<(), AccessError> {
        expect_leaf(path, "String")?;
        match value {
            Value::String(v) => {
                *self = v;
                Ok(())
            }
            found => Err(AccessError::TypeMismatch {
                native: "String",
                expected: "a text",
                found,
            }),
        }
    }
}

// Collections are never columns.
impl<T> Field for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Scalar("Vec")
    }

    fn read(&self, _: &[&str]) -> Result<Value, AccessError> {
        Err(AccessError::Unmapped { native: "Vec" })
    }

    fn write(&mut self, _: &[&str], _: Value) -> Result<(), AccessError> {
        Err(AccessError::Unmapped { native: "Vec" })
    }
}

impl<T: Field> Field for Box<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Pointer(T::type_descriptor)
    }

    fn read(&self, path: &[&str]) -> Result<Value, AccessError> {
        (**self).read(path)
    }

    fn write(&mut self, path: &[&str], value: Value) -> Result<(), AccessError> {
        (**self).write(path, value)
    }
}

/// `None` reads as `Null` for every column below it. Writing a non-null
/// value into `None` first stores `T::default()`; writing `Null` into an
/// absent sub-record leaves it absent.
impl<T: Field + Default> Field for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Optional(T::type_descriptor)
    }

    fn read(&self, path: &[&str]) -> Result<Value, AccessError> {
        match self {
            Some(inner) => inner.read(path),
            None => Ok(Value::Null),
        }
    }

    fn write(&mut self, path: &[&str], value: Value) -> Result<(), AccessError> {
        if value.is_null() {
            if path.is_empty() {
                *self = None;
                return Ok(());
            }
            return match self {
                Some(inner) => inner.write(path, value),
                None => Ok(()),
            };
        }
        self.get_or_insert_with(T::default).write(path, value)
    }
}
