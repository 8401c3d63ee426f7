//! Database access layers
//!
//! Trait-based seams over the two backends, so the session loops can be
//! exercised against in-memory doubles.

pub mod mongo;
pub mod postgres;
pub mod provider;
pub mod schema;
pub mod types;

// Re-export main types
pub use provider::{DeleteOutcome, DocumentStore, InsertOutcome, OrderStore, UpdateOutcome};
pub use schema::{Collection, ColumnSpec, Table};
pub use types::{CellValue, ColumnDef, DataType, QueryResults, Row};
