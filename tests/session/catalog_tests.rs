//! Product/order session against the in-memory document store

use crate::common::{MemoryDocumentStore, printed, scripted};
use mongodb::bson::{doc, from_document, to_document};
use orderdesk::db::{Collection, DocumentStore};
use orderdesk::error::OrderdeskError;
use orderdesk::models::{OrderDoc, Product};
use orderdesk::session::catalog::run;

async fn seeded() -> MemoryDocumentStore {
    let store = MemoryDocumentStore::default();
    let products = [
        Product::new("Latte", "Espresso with steamed milk", 4.5, true, "Coffee"),
        Product::new("Green Tea", "Loose leaf sencha", 3.0, false, "Tea"),
    ];
    let documents = products
        .iter()
        .map(|p| to_document(p).unwrap())
        .collect();
    let outcome = store
        .insert_many(Collection::Products, documents)
        .await
        .unwrap();
    assert_eq!(outcome.inserted, 2);
    store
}

fn stored_products(store: &MemoryDocumentStore) -> Vec<Product> {
    store
        .documents(Collection::Products)
        .into_iter()
        .map(|d| from_document(MemoryDocumentStore::without_id(d)).unwrap())
        .collect()
}

#[tokio::test]
async fn test_insert_then_find_product() {
    let store = MemoryDocumentStore::default();
    let mut prompter = scripted(&[
        "1",
        "Flat White",
        "Double ristretto",
        "4.75",
        "1",
        "Coffee",
        "2",
        "Flat White",
        "8",
    ]);

    run(&store, &mut prompter).await.unwrap();

    assert_eq!(
        stored_products(&store),
        vec![Product::new(
            "Flat White",
            "Double ristretto",
            4.75,
            true,
            "Coffee"
        )]
    );

    let out = printed(prompter);
    assert!(out.contains("✓ Product inserted successfully!"));
    assert!(out.contains("✓ Found: {"));
    assert!(out.contains("\"Flat White\""));
    assert!(out.ends_with("===== Goodbye! =====\n"));
}

#[tokio::test]
async fn test_failed_insert_is_reported_and_menu_continues() {
    let store = MemoryDocumentStore::default();
    *store.fail_inserts.lock().unwrap() = Some("not primary".to_string());
    let mut prompter = scripted(&[
        "1", "Latte", "Espresso", "4.5", "1", "Coffee", // product
        "6", "Ada", "Latte", "2", // order
        "8",
    ]);

    run(&store, &mut prompter).await.unwrap();

    let out = printed(prompter);
    assert_eq!(
        out.matches("*** ServerException in insert_one: not primary").count(),
        2
    );
    assert!(!out.contains("✓ Product inserted successfully!"));
    assert!(!out.contains("✓ Order placed successfully!"));
    assert!(out.ends_with("===== Goodbye! =====\n"));
    assert!(store.documents(Collection::Products).is_empty());
    assert!(store.documents(Collection::Orders).is_empty());
}

#[tokio::test]
async fn test_find_missing_product() {
    let store = seeded().await;
    let mut prompter = scripted(&["2", "Mocha", "8"]);

    run(&store, &mut prompter).await.unwrap();

    assert!(printed(prompter).contains("✗ Product not found"));
}

#[tokio::test]
async fn test_invalid_fields_reprompt() {
    let store = MemoryDocumentStore::default();
    let mut prompter = scripted(&[
        "1",
        "Bad@Name",
        "Good Name",
        "",
        "Fine",
        "10000.01",
        "-1",
        "10000",
        "2",
        "1",
        "Bakery",
        "8",
    ]);

    run(&store, &mut prompter).await.unwrap();

    let out = printed(prompter);
    assert!(out.contains("✗ Invalid name"));
    assert!(out.contains("✗ Invalid description (1-500 chars)"));
    assert_eq!(
        out.matches("Invalid input. Please enter a number between 0 and 10000: ")
            .count(),
        2
    );
    assert!(out.contains("Invalid input. Please enter a number between 0 and 1: "));

    let products = stored_products(&store);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Good Name");
    assert_eq!(products[0].price, 10000.0);
    assert!(products[0].available);
}

#[tokio::test]
async fn test_list_products() {
    let store = seeded().await;
    let mut prompter = scripted(&["3", "8"]);

    run(&store, &mut prompter).await.unwrap();

    let out = printed(prompter);
    assert!(out.contains("--- All Products ---"));
    assert!(out.contains("✓ Found 2 products:"));
    assert!(out.contains("[1] {"));
    assert!(out.contains("[2] {"));
}

#[tokio::test]
async fn test_list_empty_collections() {
    let store = MemoryDocumentStore::default();
    let mut prompter = scripted(&["3", "7", "8"]);

    run(&store, &mut prompter).await.unwrap();

    let out = printed(prompter);
    assert!(out.contains("No products found"));
    assert!(out.contains("No orders found"));
}

#[tokio::test]
async fn test_update_price() {
    let store = seeded().await;
    let mut prompter = scripted(&["4", "Latte", "5.25", "4", "Mocha", "2", "8"]);

    run(&store, &mut prompter).await.unwrap();

    let out = printed(prompter);
    assert!(out.contains("✓ Product price updated!"));
    assert!(out.contains("✗ Product not found or not modified"));
    assert_eq!(stored_products(&store)[0].price, 5.25);
}

#[tokio::test]
async fn test_update_to_same_price_is_not_modified() {
    let store = seeded().await;
    let mut prompter = scripted(&["4", "Latte", "4.5", "8"]);

    run(&store, &mut prompter).await.unwrap();

    assert!(printed(prompter).contains("✗ Product not found or not modified"));
}

#[tokio::test]
async fn test_delete_product() {
    let store = seeded().await;
    let mut prompter = scripted(&["5", "Latte", "5", "Latte", "8"]);

    run(&store, &mut prompter).await.unwrap();

    let out = printed(prompter);
    assert_eq!(out.matches("✓ Product deleted!").count(), 1);
    assert!(out.contains("✗ Product not found"));

    let names: Vec<_> = stored_products(&store).into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Green Tea"]);
}

#[tokio::test]
async fn test_place_and_view_order() {
    let store = seeded().await;
    let mut prompter = scripted(&["6", "Ada", "Latte", "2", "7", "8"]);

    run(&store, &mut prompter).await.unwrap();

    let orders = store.documents(Collection::Orders);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].get_str("customerName").unwrap(), "Ada");
    let order: OrderDoc = from_document(MemoryDocumentStore::without_id(orders[0].clone())).unwrap();
    assert_eq!(
        order,
        OrderDoc {
            customer_name: "Ada".to_string(),
            item: "Latte".to_string(),
            qty: 2,
        }
    );

    let out = printed(prompter);
    assert!(out.contains("✓ Order placed successfully!"));
    assert!(out.contains("  Customer: Ada"));
    assert!(out.contains("  Item: Latte"));
    assert!(out.contains("  Quantity: 2"));
    assert!(out.contains("✓ Found 1 orders:"));
}

#[tokio::test]
async fn test_quit_during_quantity_writes_nothing() {
    let store = MemoryDocumentStore::default();
    let mut prompter = scripted(&["6", "Ada", "Latte", "1001", "q"]);

    let result = run(&store, &mut prompter).await;

    assert!(matches!(result, Err(OrderdeskError::Quit)));
    assert!(store.documents(Collection::Orders).is_empty());
    assert!(
        printed(prompter).contains("Invalid input. Please enter a number between 1 and 1000: ")
    );
}

#[tokio::test]
async fn test_invalid_choice() {
    let store = MemoryDocumentStore::default();
    let mut prompter = scripted(&["9", "8"]);

    run(&store, &mut prompter).await.unwrap();

    assert!(printed(prompter).contains("✗ Invalid choice. Please try again."));
}

#[tokio::test]
async fn test_find_uses_exact_filter() {
    let store = seeded().await;
    let found = store
        .find_one(Collection::Products, doc! { "name": "latte" })
        .await
        .unwrap();
    assert!(found.is_empty());
}
