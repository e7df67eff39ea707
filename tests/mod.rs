use std::fmt;

use parking_lot::Mutex;
use structsql::prelude::*;

mod store;

#[derive(Record, Debug, Default, Clone, PartialEq)]
#[record(rename_all = "PascalCase")]
pub struct Product {
    pub name: String,
    pub price: f64,
}

#[derive(Record, Debug, Default, Clone, PartialEq)]
#[record(table = "Orders", rename_all = "PascalCase")]
pub struct Order {
    #[record(rename = "ID", key)]
    pub id: i64,
    pub product_attr: Product,
}

/// Order is pointed to, like an embedded pointer.
#[derive(Record, Debug, Default, Clone, PartialEq)]
#[record(rename_all = "PascalCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[record(rename = "Order")]
    pub order: Option<Box<Order>>,
    pub field: String,
}

pub fn alice() -> Customer {
    Customer {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        order: Some(Box::new(Order {
            id: 4815162342,
            product_attr: Product {
                name: "CellPhone".to_string(),
                price: 42.50,
            },
        })),
        field: "string".to_string(),
    }
}

#[derive(Debug)]
pub struct Rejected;

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rejected")
    }
}

impl std::error::Error for Rejected {}

/// Engine that records statements and answers queries with canned rows.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub statements: Mutex<Vec<(String, Vec<Value>)>>,
    pub rows: Vec<Vec<Value>>,
    pub fail: bool,
}

impl RecordingEngine {
    pub fn with_rows(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn record(&self, statement: &str, params: &[Value]) -> Result<(), ExecutionError> {
        self.statements
            .lock()
            .push((statement.to_string(), params.to_vec()));
        if self.fail {
            return Err(ExecutionError::new(statement, Rejected));
        }
        Ok(())
    }
}

impl SqlEngine for RecordingEngine {
    fn execute(&self, statement: &str, params: &[Value]) -> Result<usize, ExecutionError> {
        self.record(statement, params)?;
        Ok(1)
    }

    fn query(&self, statement: &str, params: &[Value]) -> Result<Vec<Vec<Value>>, ExecutionError> {
        self.record(statement, params)?;
        Ok(self.rows.clone())
    }
}
