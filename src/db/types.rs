//! Database type definitions
//!
//! Result sets as returned by `select_all`, independent of the driver.

use rust_decimal::Decimal;
use std::time::Duration;

/// Query execution results
#[derive(Debug, Clone)]
pub struct QueryResults {
    /// Column definitions
    pub columns: Vec<ColumnDef>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Query execution time
    pub execution_time: Duration,
}

impl QueryResults {
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<Row>, execution_time: Duration) -> Self {
        Self {
            columns,
            rows,
            execution_time,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Column definition in query results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
}

/// The column types the two tables use, plus a catch-all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Numeric,
    Text,
    Varchar,
    Unknown(String),
}

/// A single row of query results
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub values: Vec<CellValue>,
}

/// A cell value (single column value in a row)
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// NULL value
    Null,

    /// Integer value
    Integer(i64),

    /// Exact decimal (prices and totals)
    Decimal(Decimal),

    /// Text/string value
    Text(String),
}

impl CellValue {
    /// Full display string; decimals always show two fraction digits
    pub fn display_string(&self) -> String {
        match self {
            CellValue::Null => "NULL".to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Decimal(d) => format!("{:.2}", d),
            CellValue::Text(s) => s.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CellValue::Decimal(d) => Some(*d),
            CellValue::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }
}
