//! MongoDB access layer
//!
//! Concrete `DocumentStore` using the official async driver. Every failed
//! call is logged before the error is handed back to the caller.

use crate::config::CatalogConfig;
use crate::db::provider::{DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome};
use crate::db::schema::Collection;
use crate::error::{DbError, DbResult};
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{error, info, warn};

const APP_NAME: &str = "orderdesk-catalog";

/// A client bound to one named database
pub struct MongoDatabase {
    client: Client,
    db: Database,
}

impl MongoDatabase {
    /// Connect and confirm the server answers a ping.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionFailed` if the URI is malformed or the
    /// ping does not succeed within the configured timeout.
    pub async fn connect(config: &CatalogConfig) -> DbResult<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .map_err(connect_error)?;
        options.server_selection_timeout = Some(config.timeout);
        options.connect_timeout = Some(config.timeout);
        if options.app_name.is_none() {
            options.app_name = Some(APP_NAME.to_string());
        }

        let client = Client::with_options(options).map_err(connect_error)?;
        let db = client.database(&config.mongodb_database);

        ping(&client).await.map_err(connect_error)?;
        info!("connected to MongoDB database {}", config.mongodb_database);

        Ok(Self { client, db })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection(collection.name())
    }
}

impl DocumentStore for MongoDatabase {
    async fn find_one(&self, collection: Collection, filter: Document) -> DbResult<Document> {
        self.collection(collection)
            .find_one(filter)
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| failure("find_one", collection, e))
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> DbResult<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(filter)
            .await
            .map_err(|e| failure("find_many", collection, e))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| failure("find_many", collection, e))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> DbResult<InsertOutcome> {
        self.collection(collection)
            .insert_one(document)
            .await
            .map(|_| InsertOutcome { inserted: 1 })
            .map_err(|e| failure("insert_one", collection, e))
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> DbResult<InsertOutcome> {
        self.collection(collection)
            .insert_many(documents)
            .await
            .map(|result| InsertOutcome {
                inserted: result.inserted_ids.len(),
            })
            .map_err(|e| failure("insert_many", collection, e))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        update: Document,
    ) -> DbResult<UpdateOutcome> {
        self.collection(collection)
            .update_one(filter, update)
            .await
            .map(|result| UpdateOutcome {
                matched: result.matched_count,
                modified: result.modified_count,
            })
            .map_err(|e| failure("update_one", collection, e))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> DbResult<DeleteOutcome> {
        self.collection(collection)
            .delete_one(filter)
            .await
            .map(|result| DeleteOutcome {
                deleted: result.deleted_count,
            })
            .map_err(|e| failure("delete_one", collection, e))
    }

    async fn list_collections(&self) -> Vec<String> {
        match self.db.list_collection_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!("listing collections failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn is_connected(&self) -> bool {
        ping(&self.client).await.is_ok()
    }
}

async fn ping(client: &Client) -> mongodb::error::Result<Document> {
    client.database("admin").run_command(doc! { "ping": 1 }).await
}

fn connect_error(e: mongodb::error::Error) -> DbError {
    error!("failed to connect to MongoDB: {}", e);
    DbError::ConnectionFailed(e.to_string())
}

/// Log a failed driver call and wrap it as a named-operation failure
fn failure(op: &'static str, collection: Collection, e: mongodb::error::Error) -> DbError {
    error!(%collection, "{} failed: {}", op, e);
    DbError::operation(op, e)
}
