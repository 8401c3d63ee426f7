//! Entities persisted by the two programs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A row of the `menu` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl MenuItem {
    pub fn new(name: &str, description: &str, price: Decimal) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            price,
        }
    }
}

/// The fixed menu loaded at session start
pub fn seed_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            "Zucchini Fries",
            "Crispy zucchini sticks with garlic aioli",
            Decimal::new(650, 2),
        ),
        MenuItem::new(
            "Zucc Burger",
            "Grilled zucchini patty on a toasted brioche bun",
            Decimal::new(1125, 2),
        ),
        MenuItem::new(
            "Zucchini Bread",
            "Spiced loaf with walnuts, baked daily",
            Decimal::new(375, 2),
        ),
    ]
}

/// A row of the `orders` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub customer_name: String,
    /// Comma-joined item names
    pub items: String,
    /// Delivery building
    pub destination: String,
    pub total: Decimal,
}

impl Order {
    /// Build an order from chosen menu items; the total is the sum of
    /// their prices
    pub fn from_items(customer_name: &str, chosen: &[MenuItem], destination: &str) -> Self {
        let items = chosen
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let total = chosen.iter().map(|item| item.price).sum();
        Self {
            customer_name: customer_name.to_string(),
            items,
            destination: destination.to_string(),
            total,
        }
    }
}

/// A document of the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub category: String,
    /// Size variants keyed by their position ("0", "1", ...)
    #[serde(default)]
    pub options: BTreeMap<String, SizeOption>,
}

/// A size variant and its price adjustment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub name: String,
    pub price_modifier: i32,
}

impl Product {
    /// A product with the standard Small/Medium/Large sizes
    pub fn new(name: &str, description: &str, price: f64, available: bool, category: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            price,
            available,
            category: category.to_string(),
            options: default_sizes(),
        }
    }
}

/// Small -2, Medium 0, Large +3
pub fn default_sizes() -> BTreeMap<String, SizeOption> {
    [("Small", -2), ("Medium", 0), ("Large", 3)]
        .into_iter()
        .enumerate()
        .map(|(i, (name, price_modifier))| {
            (
                i.to_string(),
                SizeOption {
                    name: name.to_string(),
                    price_modifier,
                },
            )
        })
        .collect()
}

/// A document of the `order` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDoc {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub item: String,
    pub qty: i32,
}
