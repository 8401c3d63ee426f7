//! Integration tests for MongoDatabase
//!
//! Each test works in its own freshly named database.

use mongodb::bson::{doc, from_document, to_document};
use orderdesk::config::CatalogConfig;
use orderdesk::db::mongo::MongoDatabase;
use orderdesk::db::{Collection, DocumentStore};
use orderdesk::error::DbError;
use orderdesk::models::{OrderDoc, Product};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn test_config(tag: &str) -> CatalogConfig {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let uri = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("orderdesk_test_{}_{}", tag, nanos);
    CatalogConfig::from_lookup(|key| match key {
        "MONGODB_URI" => Some(uri.clone()),
        "MONGODB_DATABASE" => Some(database.clone()),
        "MONGODB_TIMEOUT_MS" => Some("2000".to_string()),
        _ => None,
    })
    .unwrap()
}

async fn connect(tag: &str) -> Option<MongoDatabase> {
    match MongoDatabase::connect(&test_config(tag)).await {
        Ok(db) => Some(db),
        Err(DbError::ConnectionFailed(e)) => {
            eprintln!("Skipping test: MongoDB not available - {}", e);
            None
        }
        Err(e) => panic!("connect failed: {}", e),
    }
}

#[tokio::test]
async fn test_connect_and_ping() {
    let Some(db) = connect("ping").await else {
        return;
    };
    assert!(db.is_connected().await);
}

#[tokio::test]
async fn test_unreachable_server_times_out() {
    let config = CatalogConfig {
        mongodb_uri: "mongodb://127.0.0.1:1".to_string(),
        timeout: Duration::from_millis(200),
        ..test_config("unreachable")
    };
    assert!(MongoDatabase::connect(&config).await.is_err());
}

#[tokio::test]
async fn test_product_round_trip() {
    let Some(db) = connect("products").await else {
        return;
    };

    let latte = Product::new("Latte", "Espresso with steamed milk", 4.5, true, "Coffee");
    let tea = Product::new("Green Tea", "Loose leaf sencha", 3.0, false, "Tea");
    let outcome = db
        .insert_many(
            Collection::Products,
            vec![to_document(&latte).unwrap(), to_document(&tea).unwrap()],
        )
        .await
        .unwrap();
    assert_eq!(outcome.inserted, 2);

    let mut found = db
        .find_one(Collection::Products, doc! { "name": "Latte" })
        .await
        .unwrap();
    assert!(found.contains_key("_id"));
    found.remove("_id");
    assert_eq!(from_document::<Product>(found).unwrap(), latte);

    let missing = db
        .find_one(Collection::Products, doc! { "name": "Mocha" })
        .await
        .unwrap();
    assert!(missing.is_empty());

    let all = db.find_many(Collection::Products, doc! {}).await.unwrap();
    assert_eq!(all.len(), 2);

    let updated = db
        .update_one(
            Collection::Products,
            doc! { "name": "Latte" },
            doc! { "$set": { "price": 5.25 } },
        )
        .await
        .unwrap();
    assert_eq!((updated.matched, updated.modified), (1, 1));

    let deleted = db
        .delete_one(Collection::Products, doc! { "name": "Green Tea" })
        .await
        .unwrap();
    assert_eq!(deleted.deleted, 1);

    assert!(
        db.list_collections()
            .await
            .contains(&"products".to_string())
    );
}

#[tokio::test]
async fn test_orders_use_singular_collection() {
    let Some(db) = connect("orders").await else {
        return;
    };

    let order = OrderDoc {
        customer_name: "Ada".to_string(),
        item: "Latte".to_string(),
        qty: 2,
    };
    db.insert_one(Collection::Orders, to_document(&order).unwrap())
        .await
        .unwrap();

    let found = db
        .find_one(Collection::Orders, doc! { "customerName": "Ada" })
        .await
        .unwrap();
    assert_eq!(found.get_i32("qty").unwrap(), 2);
    assert_eq!(db.list_collections().await, vec!["order".to_string()]);
}
