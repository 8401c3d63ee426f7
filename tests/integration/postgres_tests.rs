//! Integration tests for PostgresServer
//!
//! These tests require the test PostgreSQL database to be running. They
//! drop and recreate the `menu` and `orders` tables, so point them at a
//! scratch database.

use orderdesk::config::{ServerConfig, SslMode};
use orderdesk::db::postgres::PostgresServer;
use orderdesk::db::{CellValue, OrderStore, Table};
use orderdesk::error::DbError;
use orderdesk::models::{Order, seed_menu};
use orderdesk::prompt::Prompter;
use orderdesk::session::zucc::{login, run};
use rust_decimal::Decimal;
use std::io::Cursor;
use std::str::FromStr;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get test server config
fn test_config() -> ServerConfig {
    ServerConfig {
        host: env_or("TEST_DB_HOST", "localhost"),
        port: std::env::var("TEST_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5433),
        database: env_or("TEST_DB_NAME", "test_db"),
        ssl_mode: SslMode::Disable,
    }
}

/// Connect with the test credentials. Only an unreachable server skips
/// the test; any other failure is a real one.
async fn connect() -> Option<PostgresServer> {
    let config = test_config();
    let username = env_or("TEST_DB_USER", "test_user");
    let password = env_or("TEST_DB_PASSWORD", "test_password");
    match PostgresServer::connect(&config, &username, &password).await {
        Ok(server) => Some(server),
        Err(DbError::ConnectionFailed(e)) => {
            eprintln!(
                "Skipping test: Database not available at {} - {}",
                config.address(),
                e
            );
            None
        }
        Err(e) => panic!("connect failed: {}", e),
    }
}

#[tokio::test]
async fn test_connect_and_ping() {
    let Some(server) = connect().await else {
        return;
    };
    assert!(server.is_connected().await);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    if connect().await.is_none() {
        return;
    }
    let config = test_config();
    let username = env_or("TEST_DB_USER", "test_user");

    let result = PostgresServer::connect(&config, &username, "definitely-not-the-password").await;
    match result {
        Err(e) => assert!(e.is_retryable_login(), "unexpected error: {}", e),
        Ok(_) => eprintln!("Skipping assertion: server trusts every password"),
    }
}

#[tokio::test]
async fn test_connection_failure() {
    let mut config = test_config();
    config.host = "invalid-host-that-does-not-exist.local".to_string();
    config.port = 59999;

    let result = PostgresServer::connect(&config, "nobody", "nothing").await;
    assert!(
        matches!(result, Err(DbError::ConnectionFailed(_))),
        "Should fail to connect to invalid host"
    );
}

// One test owns the shared tables so parallel runs cannot interleave.
#[tokio::test]
async fn test_table_lifecycle() {
    let Some(server) = connect().await else {
        return;
    };

    // Start from a database without either table
    for table in Table::ALL {
        server.drop_table(table).await.unwrap();
    }
    drop(server);
    let Some(server) = connect().await else {
        return;
    };
    assert!(server.select_all(Table::Menu).await.is_err());

    server.reset_tables().await.unwrap();
    server.reset_tables().await.unwrap();
    assert_eq!(server.select_all(Table::Menu).await.unwrap().row_count(), 0);
    assert_eq!(server.select_all(Table::Orders).await.unwrap().row_count(), 0);

    let err = server.create_table(Table::Menu).await.unwrap_err();
    assert!(matches!(err, DbError::OperationFailed { .. }));

    server.populate_menu().await.unwrap();
    let menu = server.fetch_menu().await.unwrap();
    assert_eq!(menu, seed_menu());

    let order = Order::from_items("Ada", &menu[..2], "Library");
    server.insert_order(&order).await.unwrap();

    let results = server.select_all(Table::Orders).await.unwrap();
    assert_eq!(results.row_count(), 1);
    let row = &results.rows[0];
    assert_eq!(row.values[0], CellValue::Text("Ada".to_string()));
    assert_eq!(
        row.values[1],
        CellValue::Text("Zucchini Fries, Zucc Burger".to_string())
    );
    assert_eq!(row.values[2], CellValue::Text("Library".to_string()));
    assert_eq!(
        row.values[3].as_decimal(),
        Some(Decimal::from_str("17.75").unwrap())
    );

    let rendered = server.display_table(Table::Orders).await.unwrap();
    assert!(rendered.starts_with("Customer"));
    assert!(rendered.contains("17.75"));
    assert!(rendered.ends_with("(1 row)\n"));

    // destination is varchar(10)
    let far = Order::from_items("Ada", &menu[..1], "Engineering");
    let err = server.insert_order(&far).await.unwrap_err();
    assert!(err.to_string().starts_with("*** ServerException in insert_order"));

    // numeric(5,2) overflows above 999.99
    let huge = Order {
        customer_name: "Ada".to_string(),
        items: "Everything".to_string(),
        destination: "Hall".to_string(),
        total: Decimal::from(1000),
    };
    let err = server.insert_order(&huge).await.unwrap_err();
    assert!(err.to_string().starts_with("*** ServerException in insert_order"));

    // A fresh session reuses the tables from scratch
    server.reset_tables().await.unwrap();
    server.insert_order(&order).await.unwrap();
    assert_eq!(server.select_all(Table::Orders).await.unwrap().row_count(), 1);

    // Login and a whole session against a database with no tables
    for table in Table::ALL {
        server.drop_table(table).await.unwrap();
    }
    drop(server);
    let config = test_config();
    let username = env_or("TEST_DB_USER", "test_user");
    let password = env_or("TEST_DB_PASSWORD", "test_password");
    let script = format!("{}\n{}\n3\nAda\n1\n3\n\nHall\n4\n", username, password);
    let mut prompter = Prompter::new(Cursor::new(script.into_bytes()), Vec::new());

    let store = login(&mut prompter, |user, pass| {
        let config = config.clone();
        async move { PostgresServer::connect(&config, &user, &pass).await }
    })
    .await
    .unwrap();
    run(&store, &mut prompter, true).await.unwrap();

    let results = store.select_all(Table::Orders).await.unwrap();
    assert_eq!(results.row_count(), 1);
    assert_eq!(
        results.rows[0].values[3].as_decimal(),
        Some(Decimal::from_str("10.25").unwrap())
    );
    let out = String::from_utf8(prompter.into_output()).unwrap();
    assert!(out.contains("Credentials verified!"));
    assert!(out.contains("total $10.25"));

    store.drop_table(Table::Orders).await.unwrap();
    store.drop_table(Table::Orders).await.unwrap();
    assert!(store.select_all(Table::Orders).await.is_err());
}
