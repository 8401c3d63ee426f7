//! Input validation rules for the catalog program
//!
//! The relational program takes free text; these checks only guard the
//! document store.

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Longest accepted name or category
pub const MAX_NAME_LEN: usize = 100;

/// Longest accepted product description
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Accepted product prices
pub const PRICE_RANGE: RangeInclusive<f64> = 0.0..=10_000.0;

/// Accepted order quantities
pub const QUANTITY_RANGE: RangeInclusive<i32> = 1..=1000;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9\s\-']+$").expect("name pattern is a valid regex")
});

/// Names, categories and customer names: letters, digits, whitespace,
/// hyphens and apostrophes, 1 to 100 characters
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().count() <= MAX_NAME_LEN && NAME_PATTERN.is_match(name)
}

/// Descriptions: any text, 1 to 500 characters
pub fn is_valid_description(description: &str) -> bool {
    !description.is_empty() && description.chars().count() <= MAX_DESCRIPTION_LEN
}
