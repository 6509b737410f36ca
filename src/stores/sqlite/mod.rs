//! Implements the stores with a SQLite database.

mod category;

pub use category::{SQLiteCategoryStore, create_category_table};
