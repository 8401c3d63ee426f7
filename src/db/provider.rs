//! Access-layer traits
//!
//! Each program talks to its backend through one of these traits. The
//! session loops are generic over them, so they run unchanged against
//! the real drivers and against in-memory doubles in tests.

use crate::db::schema::{Collection, Table};
use crate::db::types::QueryResults;
use crate::display::render_table;
use crate::error::DbResult;
use crate::models::{MenuItem, Order, seed_menu};
use mongodb::bson::Document;

/// Relational access layer for the menu/orders tables
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Create the table with its fixed DDL
    ///
    /// # Errors
    /// Returns `DbError::OperationFailed` if the table already exists or
    /// the statement fails
    async fn create_table(&self, table: Table) -> DbResult<()>;

    /// Drop the table if it exists
    async fn drop_table(&self, table: Table) -> DbResult<()>;

    /// Insert one menu row through the prepared statement
    async fn insert_menu(&self, item: &MenuItem) -> DbResult<()>;

    /// Insert one order row through the prepared statement
    async fn insert_order(&self, order: &Order) -> DbResult<()>;

    /// `SELECT *` from the table
    async fn select_all(&self, table: Table) -> DbResult<QueryResults>;

    /// Current menu rows, in table order
    async fn fetch_menu(&self) -> DbResult<Vec<MenuItem>>;

    /// Lightweight liveness check; never fails
    async fn is_connected(&self) -> bool;

    /// Seed the menu with the fixed three items
    async fn populate_menu(&self) -> DbResult<()> {
        for item in seed_menu() {
            self.insert_menu(&item).await?;
        }
        Ok(())
    }

    /// Drop then recreate every table, leaving them empty
    async fn reset_tables(&self) -> DbResult<()> {
        for table in Table::ALL {
            self.drop_table(table).await?;
            self.create_table(table).await?;
        }
        Ok(())
    }

    /// Render the whole table in fixed-width columns
    async fn display_table(&self, table: Table) -> DbResult<String> {
        let results = self.select_all(table).await?;
        Ok(render_table(table, &results))
    }
}

/// Result of an insert: how many documents were written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted: usize,
}

/// Result of a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Result of a single-document delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

/// Document-store access layer
///
/// Filters and updates are passed through untouched; updates must
/// already use operator form (`$set`). When several documents match,
/// the first one wins.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// First matching document, or an empty document when none match
    async fn find_one(&self, collection: Collection, filter: Document) -> DbResult<Document>;

    /// Every matching document, collected eagerly. Pass `doc! {}` to
    /// match all.
    async fn find_many(&self, collection: Collection, filter: Document)
    -> DbResult<Vec<Document>>;

    async fn insert_one(&self, collection: Collection, document: Document)
    -> DbResult<InsertOutcome>;

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> DbResult<InsertOutcome>;

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        update: Document,
    ) -> DbResult<UpdateOutcome>;

    async fn delete_one(&self, collection: Collection, filter: Document)
    -> DbResult<DeleteOutcome>;

    /// Collection names in the bound database; empty on failure
    async fn list_collections(&self) -> Vec<String>;

    /// Re-issue the liveness ping; never fails
    async fn is_connected(&self) -> bool;
}
