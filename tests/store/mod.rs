mod sqlite;

use structsql::prelude::*;

use crate::{alice, Customer, Order, Product, Rejected, RecordingEngine};

#[test]
fn create_table_sends_ddl() {
    let engine = RecordingEngine::default();
    let store = RecordStore::new(&engine);

    let schema = store.create_table::<Product>().unwrap();

    assert_eq!(schema.len(), 2);
    let statements = engine.statements.lock();
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].0,
        "create table Product (\n    Name TEXT,\n    Price REAL\n)\n"
    );
    assert!(statements[0].1.is_empty());
}

#[test]
fn insert_binds_values() {
    let engine = RecordingEngine::default();
    let store = RecordStore::new(&engine);

    let affected = store.insert(&alice()).unwrap();

    assert_eq!(affected, 1);
    let statements = engine.statements.lock();
    let (sql, params) = &statements[0];
    assert!(!sql.contains("Alice"));
    assert_eq!(
        params,
        &vec![
            Value::from("Alice"),
            Value::from("alice@example.com"),
            Value::Int(4815162342),
            Value::from("CellPhone"),
            Value::Float(42.5),
            Value::from("string"),
        ]
    );
}

#[test]
fn read_by_record_key() {
    let engine = RecordingEngine::with_rows(vec![vec![
        Value::Int(7),
        Value::from("Lamp"),
        Value::Float(12.0),
    ]]);
    let store = RecordStore::new(&engine);

    let order = store.read_by_key::<Order>(7).unwrap();

    assert_eq!(
        order,
        Some(Order {
            id: 7,
            product_attr: Product {
                name: "Lamp".to_string(),
                price: 12.0,
            },
        })
    );
    let statements = engine.statements.lock();
    assert_eq!(
        statements[0],
        (
            "select ID,ProductAttr_Name,ProductAttr_Price from Orders where ID = ?".to_string(),
            vec![Value::Int(7)]
        )
    );
}

#[test]
fn read_by_configured_key() {
    let engine = RecordingEngine::default();
    let store = RecordStore::with_config(
        &engine,
        StoreConfig {
            key_column: "Email".to_string(),
        },
    );

    let customer = store.read_by_key::<Customer>("bob@example.com").unwrap();

    assert_eq!(customer, None);
    assert!(engine.statements.lock()[0].0.ends_with("where Email = ?"));
}

#[test]
fn read_by_unknown_key() {
    let engine = RecordingEngine::default();
    let store = RecordStore::new(&engine);

    let err = store.read_by_key::<Product>(1).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Mapping(MappingError::UnknownKeyColumn { ref column, .. }) if column == "id"
    ));
    assert!(engine.statements.lock().is_empty());
}

#[test]
fn short_row_is_rejected() {
    let engine = RecordingEngine::with_rows(vec![vec![Value::Int(7)]]);
    let store = RecordStore::new(&engine);

    let err = store.read_by_key::<Order>(7).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Mapping(MappingError::SchemaInstanceMismatch { .. })
    ));
}

#[test]
fn engine_failure_is_propagated() {
    let engine = RecordingEngine::failing();
    let store = RecordStore::new(&engine);

    let err = store.insert(&alice()).unwrap_err();

    match err {
        StoreError::Execution(err) => {
            assert!(err.statement.starts_with("insert into Customer"));
            assert!(err.engine_error().downcast_ref::<Rejected>().is_some());
        }
        other => panic!("unexpected error {other}"),
    }
    // not retried
    assert_eq!(engine.statements.lock().len(), 1);
}

#[derive(Record, Debug, Default)]
struct Broken {
    id: i64,
    flag: bool,
}

#[test]
fn unsupported_type_sends_nothing() {
    let engine = RecordingEngine::default();
    let store = RecordStore::new(&engine);

    assert!(store.create_table::<Broken>().is_err());
    assert!(store.insert(&Broken::default()).is_err());
    assert!(engine.statements.lock().is_empty());
}

#[test]
fn non_finite_price_sends_nothing() {
    let engine = RecordingEngine::default();
    let store = RecordStore::new(&engine);

    let err = store
        .insert(&Product {
            name: "Lamp".to_string(),
            price: f64::NAN,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Mapping(MappingError::SchemaInstanceMismatch {
            ref column,
            reason: AccessError::NonFinite { .. },
        }) if column == "Price"
    ));
    assert!(engine.statements.lock().is_empty());
}

#[derive(Record, Debug, Default, Clone, PartialEq)]
struct Note {
    text: Option<String>,
}

#[derive(Record, Debug, Default, Clone, PartialEq)]
struct Holder {
    id: i64,
    note: Option<Note>,
}

#[test]
fn all_nullable_optional_record_is_rejected() {
    let engine = RecordingEngine::default();
    let store = RecordStore::new(&engine);

    let holder = Holder {
        id: 1,
        note: Some(Note { text: None }),
    };

    assert_eq!(
        store.schema::<Holder>(),
        Err(MappingError::NullableRecord {
            field: "note".to_string()
        })
    );
    assert!(store.create_table::<Holder>().is_err());
    assert!(store.insert(&holder).is_err());
    assert!(engine.statements.lock().is_empty());
}

#[test]
fn mistyped_row_is_rejected() {
    let engine = RecordingEngine::with_rows(vec![vec![
        Value::Int(7),
        Value::from("Lamp"),
        Value::from("cheap"),
    ]]);
    let store = RecordStore::new(&engine);

    let err = store.read_by_key::<Order>(7).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Mapping(MappingError::SchemaInstanceMismatch {
            ref column,
            reason: AccessError::ColumnType { expected: SqlType::Real, .. },
        }) if column == "ProductAttr_Price"
    ));
}
