//! Known tables and collections
//!
//! Each identifier maps to its DDL and display layout, so callers never
//! branch on raw names.

use crate::error::DbError;
use std::fmt;
use std::str::FromStr;

/// Relational tables owned by the `zucc` program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Orders,
    Menu,
}

/// One displayed column: header text and fixed width in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub width: usize,
}

const ORDERS_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Customer", width: 20 },
    ColumnSpec { header: "Items", width: 30 },
    ColumnSpec { header: "Destination", width: 15 },
    ColumnSpec { header: "Total", width: 10 },
];

const MENU_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "Name", width: 20 },
    ColumnSpec { header: "Description", width: 40 },
    ColumnSpec { header: "Price", width: 10 },
];

impl Table {
    pub const ALL: [Table; 2] = [Table::Orders, Table::Menu];

    pub fn name(self) -> &'static str {
        match self {
            Table::Orders => "orders",
            Table::Menu => "menu",
        }
    }

    pub fn create_sql(self) -> &'static str {
        match self {
            Table::Orders => {
                "CREATE TABLE orders (custName varchar(20), items varchar(100), \
                 destination varchar(10), total numeric(5,2))"
            }
            Table::Menu => {
                "CREATE TABLE menu (name varchar(20), description varchar(100), \
                 price numeric(5,2))"
            }
        }
    }

    pub fn drop_sql(self) -> &'static str {
        match self {
            Table::Orders => "DROP TABLE IF EXISTS orders",
            Table::Menu => "DROP TABLE IF EXISTS menu",
        }
    }

    pub fn select_all_sql(self) -> &'static str {
        match self {
            Table::Orders => "SELECT * FROM orders",
            Table::Menu => "SELECT * FROM menu",
        }
    }

    /// Display layout, one entry per table column in declaration order
    pub fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Table::Orders => ORDERS_COLUMNS,
            Table::Menu => MENU_COLUMNS,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Table::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DbError::UnknownTable(wanted.to_string()))
    }
}

/// Document collections owned by the `catalog` program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Orders,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Orders => "order",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
