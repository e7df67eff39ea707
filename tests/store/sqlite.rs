use std::sync::Arc;
use std::thread;

use structsql::prelude::*;

use crate::{alice, Customer, Order, Product};

#[test]
fn create_and_insert_product() -> eyre::Result<()> {
    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::new(&engine);

    store.create_table::<Product>()?;
    let affected = store.insert(&Product {
        name: "CellPhone".to_string(),
        price: 42.50,
    })?;

    assert_eq!(affected, 1);
    Ok(())
}

#[test]
fn customer_round_trip() -> eyre::Result<()> {
    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::with_config(
        &engine,
        StoreConfig {
            key_column: "Name".to_string(),
        },
    );

    store.create_table::<Customer>()?;
    store.insert(&alice())?;
    let bob = Customer {
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
        order: None,
        field: String::new(),
    };
    store.insert(&bob)?;

    assert_eq!(store.read_by_key::<Customer>("Alice")?, Some(alice()));
    assert_eq!(store.read_by_key::<Customer>("Bob")?, Some(bob.clone()));
    assert_eq!(store.read_by_key::<Customer>("Carol")?, None);

    let all = store.read_all::<Customer>()?;
    assert_eq!(all, vec![alice(), bob]);
    Ok(())
}

#[test]
fn order_by_record_key() -> eyre::Result<()> {
    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::new(&engine);

    store.create_table::<Order>()?;
    let order = Order {
        id: 42,
        product_attr: Product {
            name: "Lamp".to_string(),
            price: 3.0,
        },
    };
    store.insert(&order)?;

    assert_eq!(store.read_by_key::<Order>(42)?, Some(order));
    Ok(())
}

#[test]
fn duplicate_table_is_engine_error() -> eyre::Result<()> {
    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::new(&engine);

    store.create_table::<Product>()?;
    let err = store.create_table::<Product>().unwrap_err();

    assert!(matches!(err, StoreError::Execution(_)));
    Ok(())
}

#[derive(Record, Debug, Default, Clone, PartialEq)]
struct Measurement {
    #[record(key)]
    id: i32,
    sensor: Option<String>,
    reading: f32,
    scale: u8,
}

#[test]
fn narrow_and_optional_fields() -> eyre::Result<()> {
    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::new(&engine);

    store.create_table::<Measurement>()?;
    let m = Measurement {
        id: 1,
        sensor: None,
        reading: 0.5,
        scale: 255,
    };
    store.insert(&m)?;

    assert_eq!(store.read_by_key::<Measurement>(1)?, Some(m));
    Ok(())
}

#[test]
fn out_of_range_value_is_mismatch() -> eyre::Result<()> {
    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::new(&engine);

    store.create_table::<Measurement>()?;
    engine.execute(
        "insert into Measurement (id,sensor,reading,scale) values (?,?,?,?)",
        &[Value::Int(2), Value::Null, Value::Float(1.0), Value::Int(1000)],
    )?;

    let err = store.read_by_key::<Measurement>(2).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Mapping(MappingError::SchemaInstanceMismatch { ref column, .. }) if column == "scale"
    ));
    Ok(())
}

#[test]
fn nan_is_not_stored() -> eyre::Result<()> {
    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::new(&engine);

    store.create_table::<Measurement>()?;
    let m = Measurement {
        id: 3,
        sensor: Some("thermo".to_string()),
        reading: f32::NAN,
        scale: 1,
    };

    assert!(store.insert(&m).is_err());
    assert_eq!(store.read_all::<Measurement>()?, vec![]);
    Ok(())
}

#[test]
fn shared_engine() -> eyre::Result<()> {
    let engine = Arc::new(SqliteEngine::open_in_memory()?);
    RecordStore::new(engine.as_ref()).create_table::<Order>()?;

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            thread::spawn(move || {
                let store = RecordStore::new(engine.as_ref());
                store.insert(&Order {
                    id: i,
                    product_attr: Product::default(),
                })
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("insert thread panicked")?;
    }

    let store = RecordStore::new(engine.as_ref());
    let mut ids: Vec<_> = store
        .read_all::<Order>()?
        .into_iter()
        .map(|o| o.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    Ok(())
}
