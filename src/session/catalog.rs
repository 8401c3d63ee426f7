//! `catalog`: the document-store product and order desk

use crate::config::CatalogConfig;
use crate::db::DocumentStore;
use crate::db::mongo::MongoDatabase;
use crate::db::schema::Collection;
use crate::display::{document_json, document_listing};
use crate::error::{DbError, Result};
use crate::models::{OrderDoc, Product};
use crate::prompt::Prompter;
use crate::session::report;
use crate::validate::{PRICE_RANGE, QUANTITY_RANGE, is_valid_description, is_valid_name};
use mongodb::bson::{doc, to_document};
use serde::Serialize;
use std::io::{BufRead, Write};

const MAIN_MENU: &str = "
====== MongoDB Product Management ======
1. Insert a new product
2. Find product by name
3. List all products
4. Update product price
5. Delete product
6. Place an order
7. View orders
8. Exit
========================================";

/// Full program: configuration banner, connect, session.
///
/// A failed connection is returned to the caller, which treats it as
/// fatal.
pub async fn start<R: BufRead, W: Write>(
    config: &CatalogConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say(config.summary())?;
    let store = MongoDatabase::connect(config).await?;
    prompter.say("✓ Connected to MongoDB successfully")?;

    let collections = store.list_collections().await;
    prompter.say("Collections in database:")?;
    for name in &collections {
        prompter.say(format!("  - {}", name))?;
    }

    run(&store, prompter).await
}

/// The menu loop. Returns `Ok` when the user picks "Exit".
pub async fn run<S: DocumentStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        prompter.say(MAIN_MENU)?;
        let choice = prompter.line("Enter choice (1-8): ")?;
        let outcome = match choice.trim() {
            "1" => insert_product(store, prompter).await,
            "2" => find_product(store, prompter).await,
            "3" => list_documents(store, prompter, Collection::Products).await,
            "4" => update_price(store, prompter).await,
            "5" => delete_product(store, prompter).await,
            "6" => place_order(store, prompter).await,
            "7" => list_documents(store, prompter, Collection::Orders).await,
            "8" => {
                prompter.say("\n===== Goodbye! =====")?;
                return Ok(());
            }
            _ => prompter.say("✗ Invalid choice. Please try again."),
        };
        report(prompter, outcome)?;
    }
}

fn encode<T: Serialize>(value: &T) -> Result<mongodb::bson::Document> {
    to_document(value).map_err(|e| DbError::operation("encode", e).into())
}

async fn insert_product<S: DocumentStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("\n--- Insert New Product ---")?;
    let name = prompter.validated(
        "Product name: ",
        is_valid_name,
        "✗ Invalid name (max 100 chars, letters, digits, spaces, - and ' only)",
    )?;
    let description = prompter.validated(
        "Description: ",
        is_valid_description,
        "✗ Invalid description (1-500 chars)",
    )?;
    let price = prompter.number("Price: ", PRICE_RANGE)?;
    let available = prompter.number("Available (1=yes, 0=no): ", 0..=1u8)? == 1;
    let category = prompter.validated("Category: ", is_valid_name, "✗ Invalid category")?;

    let product = Product::new(&name, &description, price, available, &category);
    store
        .insert_one(Collection::Products, encode(&product)?)
        .await?;
    prompter.say("✓ Product inserted successfully!")
}

async fn find_product<S: DocumentStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("\n--- Find Product ---")?;
    let name = prompter.line("Enter product name: ")?;
    let found = store
        .find_one(Collection::Products, doc! { "name": name })
        .await?;
    if found.is_empty() {
        prompter.say("✗ Product not found")
    } else {
        prompter.say(format!("✓ Found: {}", document_json(&found)))
    }
}

async fn list_documents<S: DocumentStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
    collection: Collection,
) -> Result<()> {
    let (title, noun) = match collection {
        Collection::Products => ("All Products", "products"),
        Collection::Orders => ("All Orders", "orders"),
    };
    prompter.say(format!("\n--- {} ---", title))?;
    let all = store.find_many(collection, doc! {}).await?;
    if all.is_empty() {
        return prompter.say(format!("No {} found", noun));
    }
    prompter.say(format!("✓ Found {} {}:\n", all.len(), noun))?;
    prompter.say(document_listing(&all))
}

async fn update_price<S: DocumentStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("\n--- Update Product Price ---")?;
    let name = prompter.validated("Enter product name: ", is_valid_name, "✗ Invalid name")?;
    let new_price = prompter.number("Enter new price: ", PRICE_RANGE)?;

    let outcome = store
        .update_one(
            Collection::Products,
            doc! { "name": name },
            doc! { "$set": { "price": new_price } },
        )
        .await?;
    if outcome.modified > 0 {
        prompter.say("✓ Product price updated!")
    } else {
        prompter.say("✗ Product not found or not modified")
    }
}

async fn delete_product<S: DocumentStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("\n--- Delete Product ---")?;
    let name = prompter.line("Enter product name: ")?;
    let outcome = store
        .delete_one(Collection::Products, doc! { "name": name })
        .await?;
    if outcome.deleted > 0 {
        prompter.say("✓ Product deleted!")
    } else {
        prompter.say("✗ Product not found")
    }
}

async fn place_order<S: DocumentStore, R: BufRead, W: Write>(
    store: &S,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("\n--- Place Order ---")?;
    let customer_name = prompter.validated(
        "Enter customer name: ",
        is_valid_name,
        "✗ Invalid customer name",
    )?;
    let item = prompter.validated("Enter item name: ", is_valid_name, "✗ Invalid item name")?;
    let qty = prompter.number("Enter quantity: ", QUANTITY_RANGE)?;

    let order = OrderDoc {
        customer_name,
        item,
        qty,
    };
    store.insert_one(Collection::Orders, encode(&order)?).await?;

    prompter.say("✓ Order placed successfully!")?;
    prompter.say(format!("  Customer: {}", order.customer_name))?;
    prompter.say(format!("  Item: {}", order.item))?;
    prompter.say(format!("  Quantity: {}", order.qty))
}
