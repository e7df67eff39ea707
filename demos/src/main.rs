use structsql::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Record, Debug, Default, Clone, PartialEq)]
#[record(rename_all = "PascalCase")]
struct Product {
    name: String,
    price: f64,
}

#[derive(Record, Debug, Default, Clone, PartialEq)]
#[record(table = "Orders", rename_all = "PascalCase")]
struct Order {
    #[record(rename = "ID")]
    id: i64,
    product_attr: Product,
}

#[derive(Record, Debug, Default, Clone, PartialEq)]
#[record(rename_all = "PascalCase")]
struct Customer {
    #[record(key)]
    name: String,
    email: String,
    #[record(rename = "Order")]
    order: Option<Box<Order>>,
    field: String,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone = Product {
        name: "CellPhone".to_string(),
        price: 42.50,
    };
    let alice = Customer {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        order: Some(Box::new(Order {
            id: 4815162342,
            product_attr: phone.clone(),
        })),
        field: "string".to_string(),
    };

    let schema = TableSchema::of::<Customer>()?;
    print!("\n{}", schema.create_table_sql()?);
    println!("{}", schema);

    let engine = SqliteEngine::open_in_memory()?;
    let store = RecordStore::new(&engine);

    store.create_table::<Product>()?;
    store.insert(&phone)?;

    store.create_table::<Customer>()?;
    store.insert(&alice)?;

    let read = store.read_by_key::<Customer>("Alice")?;
    println!("{:#?}", read);
    assert_eq!(read, Some(alice));

    Ok(())
}
