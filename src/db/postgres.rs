//! PostgreSQL access layer
//!
//! Concrete `OrderStore` using tokio-postgres. One client per session;
//! the two insert statements are prepared on first use, since the tables
//! may not exist until the session resets them.

use crate::config::{ServerConfig, SslMode};
use crate::db::provider::OrderStore;
use crate::db::schema::Table;
use crate::db::types::{CellValue, ColumnDef, DataType, QueryResults, Row};
use crate::error::{DbError, DbResult};
use crate::models::{MenuItem, Order};
use rust_decimal::Decimal;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::Type;
use tokio::sync::OnceCell;
use tokio_postgres::{Client, Statement};
use tracing::{debug, error, info};

const INSERT_MENU_SQL: &str = "INSERT INTO menu (name, description, price) VALUES ($1, $2, $3)";

const INSERT_ORDER_SQL: &str =
    "INSERT INTO orders (custName, items, destination, total) VALUES ($1, $2, $3, $4)";

const SELECT_MENU_SQL: &str = "SELECT name, description, price FROM menu";

/// PostgreSQL session owning the connection and prepared inserts
pub struct PostgresServer {
    /// The tokio-postgres client
    client: Client,
    insert_menu: OnceCell<Statement>,
    insert_order: OnceCell<Statement>,
}

impl PostgresServer {
    /// Connect with the given credentials. Works against an empty
    /// database.
    ///
    /// # Errors
    /// `DbError::AuthRejected` when the server refuses the credentials,
    /// `DbError::ConnectionFailed` when it cannot be reached.
    pub async fn connect(config: &ServerConfig, username: &str, password: &str) -> DbResult<Self> {
        let conn_string = config.connection_string(username, password);

        let client = match config.ssl_mode {
            SslMode::Disable => {
                let (client, connection) =
                    tokio_postgres::connect(&conn_string, tokio_postgres::NoTls)
                        .await
                        .map_err(connect_error)?;
                tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        error!("connection lost: {}", e);
                    }
                });
                client
            }
            SslMode::Prefer | SslMode::Require => {
                let tls = tokio_postgres_rustls::MakeRustlsConnect::new(make_tls_config());
                let (client, connection) = tokio_postgres::connect(&conn_string, tls)
                    .await
                    .map_err(connect_error)?;
                tokio::spawn(async move {
                    if let Err(e) = connection.await {
                        error!("connection lost: {}", e);
                    }
                });
                client
            }
        };

        info!("connected to {} as {}", config.address(), username);

        Ok(Self {
            client,
            insert_menu: OnceCell::new(),
            insert_order: OnceCell::new(),
        })
    }

    /// The statement cached in `cell`, prepared from `sql` the first time
    async fn prepared<'a>(
        &self,
        cell: &'a OnceCell<Statement>,
        op: &'static str,
        sql: &str,
    ) -> DbResult<&'a Statement> {
        cell.get_or_try_init(|| async {
            debug!("{}: preparing {}", op, sql);
            self.client.prepare(sql).await.map_err(|e| failure(op, e))
        })
        .await
    }

    async fn batch(&self, op: &'static str, sql: &str) -> DbResult<()> {
        debug!("{}: {}", op, sql);
        self.client
            .batch_execute(sql)
            .await
            .map_err(|e| failure(op, e))
    }
}

impl OrderStore for PostgresServer {
    async fn create_table(&self, table: Table) -> DbResult<()> {
        self.batch("create_table", table.create_sql()).await
    }

    async fn drop_table(&self, table: Table) -> DbResult<()> {
        self.batch("drop_table", table.drop_sql()).await
    }

    async fn insert_menu(&self, item: &MenuItem) -> DbResult<()> {
        let stmt = self
            .prepared(&self.insert_menu, "insert_menu", INSERT_MENU_SQL)
            .await?;
        self.client
            .execute(stmt, &[&item.name, &item.description, &item.price])
            .await
            .map_err(|e| failure("insert_menu", e))?;
        Ok(())
    }

    async fn insert_order(&self, order: &Order) -> DbResult<()> {
        let stmt = self
            .prepared(&self.insert_order, "insert_order", INSERT_ORDER_SQL)
            .await?;
        self.client
            .execute(
                stmt,
                &[
                    &order.customer_name,
                    &order.items,
                    &order.destination,
                    &order.total,
                ],
            )
            .await
            .map_err(|e| failure("insert_order", e))?;
        Ok(())
    }

    async fn select_all(&self, table: Table) -> DbResult<QueryResults> {
        let start = std::time::Instant::now();

        let stmt = self
            .client
            .prepare(table.select_all_sql())
            .await
            .map_err(|e| failure("display_table", e))?;

        let columns: Vec<ColumnDef> = stmt
            .columns()
            .iter()
            .map(|col| ColumnDef {
                name: col.name().to_string(),
                data_type: pg_type_to_datatype(col.type_()),
            })
            .collect();

        let pg_rows = self
            .client
            .query(&stmt, &[])
            .await
            .map_err(|e| failure("display_table", e))?;

        let rows = pg_rows
            .iter()
            .map(|pg_row| Row {
                values: columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| extract_cell_value(pg_row, i, &col.data_type))
                    .collect(),
            })
            .collect();

        let results = QueryResults::new(columns, rows, start.elapsed());
        debug!(
            "select_all {}: {} rows in {:?}",
            table,
            results.row_count(),
            results.execution_time
        );
        Ok(results)
    }

    async fn fetch_menu(&self) -> DbResult<Vec<MenuItem>> {
        let rows = self
            .client
            .query(SELECT_MENU_SQL, &[])
            .await
            .map_err(|e| failure("fetch_menu", e))?;

        rows.iter()
            .map(|row| -> DbResult<MenuItem> {
                let name: Option<String> = row.try_get(0).map_err(|e| failure("fetch_menu", e))?;
                let description: Option<String> =
                    row.try_get(1).map_err(|e| failure("fetch_menu", e))?;
                let price: Option<Decimal> =
                    row.try_get(2).map_err(|e| failure("fetch_menu", e))?;
                Ok(MenuItem {
                    name: name.unwrap_or_default(),
                    description: description.unwrap_or_default(),
                    price: price.unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn is_connected(&self) -> bool {
        self.client.simple_query("SELECT 1").await.is_ok()
    }
}

/// The server's own message when there is one, otherwise the driver's
fn driver_message(e: &tokio_postgres::Error) -> String {
    e.as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| e.to_string())
}

/// Log a failed driver call and wrap it as a named-operation failure
fn failure(op: &'static str, e: tokio_postgres::Error) -> DbError {
    let message = driver_message(&e);
    error!("{} failed: {}", op, message);
    DbError::OperationFailed { op, message }
}

/// Split connect failures into rejected credentials and everything else
fn connect_error(e: tokio_postgres::Error) -> DbError {
    let message = driver_message(&e);
    match e.code() {
        Some(code)
            if *code == SqlState::INVALID_PASSWORD
                || *code == SqlState::INVALID_AUTHORIZATION_SPECIFICATION =>
        {
            DbError::AuthRejected(message)
        }
        _ => DbError::ConnectionFailed(message),
    }
}

/// Map tokio_postgres Type to our DataType enum
fn pg_type_to_datatype(pg_type: &Type) -> DataType {
    match *pg_type {
        Type::INT2 | Type::INT4 | Type::INT8 => DataType::Integer,
        Type::NUMERIC => DataType::Numeric,
        Type::TEXT | Type::NAME => DataType::Text,
        Type::VARCHAR | Type::CHAR | Type::BPCHAR => DataType::Varchar,
        _ => DataType::Unknown(pg_type.name().to_string()),
    }
}

/// Build a rustls ClientConfig that trusts OS certificates (with Mozilla roots as fallback)
fn make_tls_config() -> rustls::ClientConfig {
    let mut root_store = rustls::RootCertStore::empty();

    let native_certs = rustls_native_certs::load_native_certs();
    let mut loaded = 0;
    for cert in native_certs.certs {
        if root_store.add(cert).is_ok() {
            loaded += 1;
        }
    }
    if loaded == 0 {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

/// Extract a cell value from a tokio_postgres Row based on the column's DataType,
/// falling back to the text form when the typed read fails.
fn extract_cell_value(row: &tokio_postgres::Row, idx: usize, data_type: &DataType) -> CellValue {
    match data_type {
        DataType::Integer => match row.try_get::<_, Option<i64>>(idx) {
            Ok(Some(v)) => CellValue::Integer(v),
            Ok(None) => CellValue::Null,
            Err(_) => match row.try_get::<_, Option<i32>>(idx) {
                Ok(Some(v)) => CellValue::Integer(i64::from(v)),
                Ok(None) => CellValue::Null,
                Err(_) => try_as_string(row, idx),
            },
        },
        DataType::Numeric => match row.try_get::<_, Option<Decimal>>(idx) {
            Ok(Some(v)) => CellValue::Decimal(v),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        _ => try_as_string(row, idx),
    }
}

/// Try to extract a value as a string (fallback for type mismatches).
fn try_as_string(row: &tokio_postgres::Row, idx: usize) -> CellValue {
    match row.try_get::<_, Option<String>>(idx) {
        Ok(Some(v)) => CellValue::Text(v),
        Ok(None) => CellValue::Null,
        Err(_) => {
            let type_name = row
                .columns()
                .get(idx)
                .map_or("unknown", |c| c.type_().name());
            CellValue::Text(format!("<unable to display: {}>", type_name))
        }
    }
}
