extern crate self as structsql;

mod binder;
mod descriptor;
pub mod engine;
mod error;
mod mapper;
pub mod query;
mod schema;
mod store;
mod value;

pub use binder::*;
pub use descriptor::*;
pub use error::*;
pub use mapper::*;
pub use schema::*;
pub use store::*;
pub use value::*;

pub use structsql_codegen::Record;

pub mod prelude {
    pub use crate::engine::{SqlEngine, SqliteEngine};
    pub use crate::{
        AccessError, Column, ExecutionError, Field, FlatSchema, MappingError, Record,
        RecordStore, SqlType, StoreConfig, StoreError, TableSchema, Value,
    };
}
